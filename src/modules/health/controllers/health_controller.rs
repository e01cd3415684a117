use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::modules::reports::ReportService;

/// Liveness body
#[derive(Debug, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

/// Catalog store round-trip result
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreStatus {
    pub reachable: bool,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Readiness body
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub store: StoreStatus,
    pub currency: String,
}

/// GET /health
///
/// Answers as long as the process serves requests; the store is not touched.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(LivenessResponse {
        status: "healthy".to_string(),
        service: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /ready - 200 once the catalog store answers, 503 otherwise
pub async fn readiness_check(service: web::Data<ReportService>) -> HttpResponse {
    let started = Instant::now();
    let outcome = service.ping().await;
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let store = match outcome {
        Ok(()) => StoreStatus {
            reachable: true,
            latency_ms,
            error: None,
        },
        Err(e) => {
            tracing::error!(latency_ms, "Catalog store readiness check failed: {}", e);
            StoreStatus {
                reachable: false,
                latency_ms,
                error: Some(e.to_string()),
            }
        }
    };

    let response = ReadinessResponse {
        ready: store.reachable,
        store,
        currency: service.config().currency.to_string(),
    };

    if response.ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
