use actix_web::{error::QueryPayloadError, web, HttpRequest};

use crate::core::AppError;

/// Turn malformed query strings into the same JSON validation error the
/// handlers return
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(path = %req.path(), "Rejected query string: {}", err);
    AppError::validation(format!("Invalid query string: {}", err)).into()
}

/// Query extractor configuration using [`query_error_handler`]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}
