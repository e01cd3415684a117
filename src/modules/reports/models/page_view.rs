use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::category::ProductId;

/// Aggregated page-view counter for one page over one recorded date range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PageViewCounter {
    pub page_type_id: u32,
    /// Referenced object; a product id for product detail pages
    pub object_id: Option<String>,
    pub count: u32,
    pub time_start: NaiveDateTime,
    pub time_end: NaiveDateTime,
}

impl PageViewCounter {
    /// Product referenced by the page, if the object id is a valid product id
    pub fn product_id(&self) -> Option<ProductId> {
        self.object_id
            .as_deref()
            .and_then(|raw| raw.trim().parse::<ProductId>().ok())
            .filter(|id| *id > 0)
    }
}
