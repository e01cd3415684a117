use crate::core::{AppError, Currency, Result};
use serde::Deserialize;
use std::env;
use tracing::level_filters::LevelFilter;

pub mod database;
pub mod report;
pub mod server;

pub use database::DatabaseConfig;
pub use report::ReportConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    /// Level of this crate's own events (`LOG_LEVEL`)
    pub log_level: String,
}

impl AppConfig {
    /// Default tracing filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> String {
        format!("category_stats={},actix_web=info", self.log_level.trim())
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            report: ReportConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.app.log_level.trim().parse::<LevelFilter>().is_err() {
            return Err(AppError::Configuration(format!(
                "LOG_LEVEL '{}' is not a tracing level",
                self.app.log_level
            )));
        }

        if self.database.max_connections == 0 {
            return Err(AppError::Configuration(
                "DATABASE_MAX_CONNECTIONS must be greater than 0".to_string(),
            ));
        }

        if self.database.pool_size > self.database.max_connections {
            return Err(AppError::Configuration(
                "DATABASE_POOL_SIZE cannot exceed DATABASE_MAX_CONNECTIONS".to_string(),
            ));
        }

        self.report.validate()
    }
}

/// Read an env var and parse it, falling back to `default` when unset
pub(crate) fn parse_env<T: std::str::FromStr>(key: &str, default: &str) -> Result<T> {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .trim()
        .parse()
        .map_err(|_| AppError::Configuration(format!("Invalid {}", key)))
}

pub(crate) fn parse_currency(key: &str, default: &str) -> Result<Currency> {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|e: String| AppError::Configuration(format!("{}: {}", key, e)))
}
