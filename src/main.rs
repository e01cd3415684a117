use std::sync::Arc;

use actix_web::{middleware::from_fn, web, App, HttpResponse, HttpServer};
use category_stats::config::Config;
use category_stats::core::{IsoPriceFormatter, PriceFormatter};
use category_stats::middleware::{query_config, request_id};
use category_stats::modules::{health, reports};
use category_stats::reports::{MySqlCatalogStore, ReportService};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(startup_error)?;
    config.validate().map_err(startup_error)?;

    // Initialize tracing; RUST_LOG overrides LOG_LEVEL, LOG_FORMAT=json switches
    // to structured output
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| config.app.log_filter().into()),
    );
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting category statistics service");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!(
        "Report currency: {}, language: {}, shop: {}",
        config.report.currency,
        config.report.lang_id,
        config.report.shop_id
    );

    // Create database connection pool
    let db_pool = config.database.create_pool().await.map_err(startup_error)?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    let store = MySqlCatalogStore::new(db_pool, config.report.clone()).map_err(startup_error)?;
    let service = web::Data::new(ReportService::new(Arc::new(store), config.report.clone()));
    let formatter: web::Data<dyn PriceFormatter> =
        web::Data::from(Arc::new(IsoPriceFormatter) as Arc<dyn PriceFormatter>);

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(from_fn(request_id))
            .app_data(service.clone())
            .app_data(formatter.clone())
            .app_data(query_config())
            .configure(health::configure)
            .configure(reports::controllers::configure)
            .route("/", web::get().to(index))
    })
    .bind(&bind_address)?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await
}

fn startup_error(e: category_stats::core::AppError) -> std::io::Error {
    tracing::error!("Startup failed: {}", e);
    std::io::Error::other(format!("startup failed: {}", e))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "service": "category-stats",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running"
    }))
}
