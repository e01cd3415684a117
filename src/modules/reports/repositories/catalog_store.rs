use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};

use crate::core::error::AppError;
use crate::modules::reports::models::{
    CategoryId, CategoryNode, CategoryProductLink, DateWindow, PageViewCounter, ProductId,
    SalesTotals, ShopScope,
};

/// What the report needs read from the catalog for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotRequest {
    pub window: DateWindow,
    pub scope: ShopScope,
}

/// Everything one report reads, taken from a single consistent view of the store
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub categories: Vec<CategoryNode>,
    /// Category links of the products that sold or were viewed in the window
    pub links: Vec<CategoryProductLink>,
    /// Unrounded totals per product over valid orders invoiced inside the window
    pub product_sales: HashMap<ProductId, SalesTotals>,
    /// Product page counters whose date range lies inside the window
    pub page_views: Vec<PageViewCounter>,
    /// Root categories of the scoped shops; `None` when no shop restriction applies
    pub shop_roots: Option<BTreeSet<CategoryId>>,
}

/// Products whose category links can contribute to a report
pub fn reported_products(
    product_sales: &HashMap<ProductId, SalesTotals>,
    page_views: &[PageViewCounter],
) -> HashSet<ProductId> {
    product_sales
        .keys()
        .copied()
        .chain(page_views.iter().filter_map(PageViewCounter::product_id))
        .collect()
}

/// Read-only access to the catalog, order and traffic tables
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Load every input of one report from one consistent snapshot
    async fn load_snapshot(&self, request: &SnapshotRequest) -> Result<CatalogSnapshot, AppError>;

    /// Cheap round-trip used by the readiness check
    async fn ping(&self) -> Result<(), AppError>;
}
