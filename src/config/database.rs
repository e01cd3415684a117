use crate::config::parse_env;
use crate::core::{AppError, Result};
use serde::Deserialize;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::env;
use std::time::Duration;

/// Catalog database connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    /// Connections kept open while idle
    pub pool_size: u32,
    pub max_connections: u32,
    /// How long a report waits for a free connection
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let url = env::var("DATABASE_URL")
            .map_err(|_| AppError::configuration("DATABASE_URL not set"))?;

        Ok(Self {
            url,
            pool_size: parse_env("DATABASE_POOL_SIZE", "2")?,
            max_connections: parse_env("DATABASE_MAX_CONNECTIONS", "10")?,
            acquire_timeout_secs: parse_env("DATABASE_ACQUIRE_TIMEOUT_SECS", "30")?,
        })
    }

    /// Pool for the read-only report queries. Each report holds one
    /// connection for the length of its snapshot transaction.
    pub async fn create_pool(&self) -> Result<MySqlPool> {
        let pool = MySqlPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.pool_size)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(&self.url)
            .await?;

        Ok(pool)
    }
}
