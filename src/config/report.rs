use crate::config::{parse_currency, parse_env};
use crate::core::{AppError, Currency, Result};
use serde::Deserialize;
use std::env;

/// Settings for the best-categories report
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Reporting currency; all order amounts are normalised into it
    pub currency: Currency,
    /// Language used for category names
    pub lang_id: u32,
    /// Shop whose localized category names are used
    pub shop_id: u32,
    /// Catalog table prefix, e.g. `ps_`
    pub table_prefix: String,
    /// Page type id designating a product detail page in the traffic counters
    pub product_page_type_id: u32,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency: Currency::EUR,
            lang_id: 1,
            shop_id: 1,
            table_prefix: "ps_".to_string(),
            product_page_type_id: 1,
            default_page_size: 40,
            max_page_size: 1000,
        }
    }
}

impl ReportConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            currency: parse_currency("REPORT_CURRENCY", "EUR")?,
            lang_id: parse_env("REPORT_LANG_ID", "1")?,
            shop_id: parse_env("REPORT_SHOP_ID", "1")?,
            table_prefix: env::var("DB_TABLE_PREFIX").unwrap_or_else(|_| "ps_".to_string()),
            product_page_type_id: parse_env("REPORT_PRODUCT_PAGE_TYPE_ID", "1")?,
            default_page_size: parse_env("REPORT_DEFAULT_PAGE_SIZE", "40")?,
            max_page_size: parse_env("REPORT_MAX_PAGE_SIZE", "1000")?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        // The prefix is spliced into table names, which cannot be bound as parameters
        if !self
            .table_prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(AppError::Configuration(format!(
                "DB_TABLE_PREFIX may only contain [A-Za-z0-9_], got '{}'",
                self.table_prefix
            )));
        }

        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(AppError::Configuration(
                "Report page sizes must be greater than 0".to_string(),
            ));
        }

        if self.default_page_size > self.max_page_size {
            return Err(AppError::Configuration(
                "REPORT_DEFAULT_PAGE_SIZE cannot exceed REPORT_MAX_PAGE_SIZE".to_string(),
            ));
        }

        Ok(())
    }
}
