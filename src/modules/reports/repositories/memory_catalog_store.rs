use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};

use super::catalog_store::{reported_products, CatalogSnapshot, CatalogStore, SnapshotRequest};
use crate::core::{AppError, Result};
use crate::modules::reports::services::sales_aggregator::ProductSalesAccumulator;
use crate::modules::reports::models::{
    CategoryId, CategoryNode, CategoryProductLink, PageViewCounter, SaleLine, ShopId, ShopScope,
};

/// Catalog store over in-memory tables.
///
/// Applies the same row predicates as the MySQL store, so reports computed
/// from it match what the database would return for the same rows.
#[derive(Debug, Clone)]
pub struct InMemoryCatalogStore {
    categories: Vec<CategoryNode>,
    links: Vec<CategoryProductLink>,
    sale_lines: Vec<SaleLine>,
    page_views: Vec<PageViewCounter>,
    shop_roots: BTreeMap<ShopId, CategoryId>,
    product_page_type_id: u32,
    unavailable: bool,
}

impl Default for InMemoryCatalogStore {
    fn default() -> Self {
        Self::new(1)
    }
}

impl InMemoryCatalogStore {
    pub fn new(product_page_type_id: u32) -> Self {
        Self {
            categories: Vec::new(),
            links: Vec::new(),
            sale_lines: Vec::new(),
            page_views: Vec::new(),
            shop_roots: BTreeMap::new(),
            product_page_type_id,
            unavailable: false,
        }
    }

    pub fn with_category(mut self, category: CategoryNode) -> Self {
        self.categories.push(category);
        self
    }

    pub fn with_link(mut self, category_id: CategoryId, product_id: u32) -> Self {
        self.links.push(CategoryProductLink::new(category_id, product_id));
        self
    }

    pub fn with_sale_line(mut self, line: SaleLine) -> Self {
        self.sale_lines.push(line);
        self
    }

    pub fn with_page_views(mut self, counter: PageViewCounter) -> Self {
        self.page_views.push(counter);
        self
    }

    pub fn with_shop_root(mut self, shop_id: ShopId, category_id: CategoryId) -> Self {
        self.shop_roots.insert(shop_id, category_id);
        self
    }

    /// Make every subsequent read fail as if the database were down
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }

    fn ensure_available(&self) -> Result<()> {
        if self.unavailable {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn load_snapshot(&self, request: &SnapshotRequest) -> Result<CatalogSnapshot> {
        self.ensure_available()?;

        let window = &request.window;
        let scoped_shops: Option<&BTreeSet<ShopId>> = match &request.scope {
            ShopScope::All => None,
            ShopScope::Shops(shops) => Some(shops),
        };

        let shop_roots = scoped_shops.map(|shops| {
            shops
                .iter()
                .filter_map(|shop| self.shop_roots.get(shop).copied())
                .collect::<BTreeSet<_>>()
        });

        let mut sales = ProductSalesAccumulator::new(*window);
        self.sale_lines
            .iter()
            .filter(|line| scoped_shops.map_or(true, |shops| shops.contains(&line.shop_id)))
            .for_each(|line| sales.add(line));
        let product_sales = sales.finish();

        let page_views: Vec<PageViewCounter> = self
            .page_views
            .iter()
            .filter(|counter| counter.page_type_id == self.product_page_type_id)
            .filter(|counter| window.covers(counter.time_start, counter.time_end))
            .cloned()
            .collect();

        let products = reported_products(&product_sales, &page_views);
        let links = self
            .links
            .iter()
            .filter(|link| products.contains(&link.product_id))
            .copied()
            .collect();

        Ok(CatalogSnapshot {
            categories: self.categories.clone(),
            links,
            product_sales,
            page_views,
            shop_roots,
        })
    }

    async fn ping(&self) -> Result<()> {
        self.ensure_available()
    }
}
