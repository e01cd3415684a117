// MySQL-backed catalog store
//
// Every read of one report runs inside a single transaction, so category
// tree, orders and traffic counters come from the same InnoDB snapshot.
// Order lines and category links are streamed: lines are folded into
// per-product totals and only links of reported products are kept.
// Caller-supplied values are always bound; only the configured (validated)
// table prefix is spliced into the SQL text.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use sqlx::{MySql, MySqlConnection, MySqlPool, QueryBuilder};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

use super::catalog_store::{reported_products, CatalogSnapshot, CatalogStore, SnapshotRequest};
use crate::config::ReportConfig;
use crate::core::{AppError, Result};
use crate::modules::reports::models::{
    CategoryId, CategoryNode, CategoryProductLink, DateWindow, PageViewCounter, ProductId,
    SaleLine, SalesTotals, ShopId, ShopScope,
};
use crate::modules::reports::services::sales_aggregator::ProductSalesAccumulator;

pub struct MySqlCatalogStore {
    pool: MySqlPool,
    config: ReportConfig,
}

impl MySqlCatalogStore {
    pub fn new(pool: MySqlPool, config: ReportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { pool, config })
    }

    fn table(&self, name: &str) -> String {
        format!("`{}{}`", self.config.table_prefix, name)
    }

    async fn fetch_categories(&self, conn: &mut MySqlConnection) -> Result<Vec<CategoryNode>> {
        let sql = format!(
            r#"
            SELECT c.id_category, c.id_parent, c.nleft, c.nright,
                   cl.name AS name, pl.name AS parent_name
            FROM {category} c
            LEFT JOIN {category_lang} cl
                ON (cl.id_category = c.id_category AND cl.id_lang = ? AND cl.id_shop = ?)
            LEFT JOIN {category_lang} pl
                ON (pl.id_category = c.id_parent AND pl.id_lang = ? AND pl.id_shop = ?)
            ORDER BY c.nleft
            "#,
            category = self.table("category"),
            category_lang = self.table("category_lang"),
        );

        let categories = sqlx::query_as::<_, CategoryNode>(&sql)
            .bind(self.config.lang_id)
            .bind(self.config.shop_id)
            .bind(self.config.lang_id)
            .bind(self.config.shop_id)
            .fetch_all(&mut *conn)
            .await?;

        Ok(categories)
    }

    async fn fetch_shop_roots(
        &self,
        conn: &mut MySqlConnection,
        shops: &BTreeSet<ShopId>,
    ) -> Result<BTreeSet<CategoryId>> {
        if shops.is_empty() {
            return Ok(BTreeSet::new());
        }

        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(format!(
            "SELECT s.id_category FROM {} s WHERE s.id_shop IN (",
            self.table("shop")
        ));
        let mut ids = builder.separated(", ");
        for shop in shops {
            ids.push_bind(*shop);
        }
        ids.push_unseparated(")");

        let roots: Vec<CategoryId> = builder
            .build_query_scalar::<CategoryId>()
            .fetch_all(&mut *conn)
            .await?;

        Ok(roots.into_iter().collect())
    }

    async fn fetch_links(
        &self,
        conn: &mut MySqlConnection,
        products: &HashSet<ProductId>,
    ) -> Result<Vec<CategoryProductLink>> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id_category, id_product FROM {}",
            self.table("category_product")
        );

        let mut rows = sqlx::query_as::<_, CategoryProductLink>(&sql).fetch(&mut *conn);
        let mut links = Vec::new();
        while let Some(link) = rows.try_next().await? {
            if products.contains(&link.product_id) {
                links.push(link);
            }
        }

        Ok(links)
    }

    async fn fetch_product_sales(
        &self,
        conn: &mut MySqlConnection,
        window: &DateWindow,
        scope: &ShopScope,
    ) -> Result<HashMap<ProductId, SalesTotals>> {
        let mut builder: QueryBuilder<MySql> = QueryBuilder::new(format!(
            r#"
            SELECT o.id_order AS order_id, o.id_shop AS shop_id,
                   od.product_id AS product_id,
                   NULLIF(od.product_attribute_id, 0) AS variant_id,
                   od.product_quantity AS quantity,
                   od.unit_price_tax_excl AS unit_price_tax_excl,
                   od.original_wholesale_price AS original_wholesale_price,
                   pa.wholesale_price AS variant_wholesale_price,
                   pr.wholesale_price AS product_wholesale_price,
                   o.conversion_rate AS conversion_rate,
                   o.valid AS order_valid,
                   o.invoice_date AS invoice_date
            FROM {order_detail} od
            INNER JOIN {orders} o ON o.id_order = od.id_order
            LEFT JOIN {product_attribute} pa ON pa.id_product_attribute = od.product_attribute_id
            LEFT JOIN {product} pr ON pr.id_product = od.product_id
            WHERE o.valid = 1 AND o.invoice_date BETWEEN "#,
            order_detail = self.table("order_detail"),
            orders = self.table("orders"),
            product_attribute = self.table("product_attribute"),
            product = self.table("product"),
        ));
        builder.push_bind(window.start());
        builder.push(" AND ");
        builder.push_bind(window.end());

        if let ShopScope::Shops(shops) = scope {
            if shops.is_empty() {
                return Ok(HashMap::new());
            }
            builder.push(" AND o.id_shop IN (");
            let mut ids = builder.separated(", ");
            for shop in shops {
                ids.push_bind(*shop);
            }
            ids.push_unseparated(")");
        }

        let mut sales = ProductSalesAccumulator::new(*window);
        let mut lines = 0usize;
        let mut rows = builder.build_query_as::<SaleLine>().fetch(&mut *conn);
        while let Some(line) = rows.try_next().await? {
            sales.add(&line);
            lines += 1;
        }

        debug!(lines, "Folded order lines into product totals");
        Ok(sales.finish())
    }

    async fn fetch_page_views(
        &self,
        conn: &mut MySqlConnection,
        window: &DateWindow,
    ) -> Result<Vec<PageViewCounter>> {
        let sql = format!(
            r#"
            SELECT p.id_page_type AS page_type_id,
                   CAST(p.id_object AS CHAR) AS object_id,
                   pv.counter AS count,
                   dr.time_start AS time_start,
                   dr.time_end AS time_end
            FROM {page} p
            INNER JOIN {page_viewed} pv ON pv.id_page = p.id_page
            INNER JOIN {date_range} dr ON dr.id_date_range = pv.id_date_range
            WHERE p.id_page_type = ?
              AND dr.time_start BETWEEN ? AND ?
              AND dr.time_end BETWEEN ? AND ?
            "#,
            page = self.table("page"),
            page_viewed = self.table("page_viewed"),
            date_range = self.table("date_range"),
        );

        let counters = sqlx::query_as::<_, PageViewCounter>(&sql)
            .bind(self.config.product_page_type_id)
            .bind(window.start())
            .bind(window.end())
            .bind(window.start())
            .bind(window.end())
            .fetch_all(&mut *conn)
            .await?;

        Ok(counters)
    }
}

#[async_trait]
impl CatalogStore for MySqlCatalogStore {
    async fn load_snapshot(&self, request: &SnapshotRequest) -> Result<CatalogSnapshot> {
        let mut tx = self.pool.begin().await?;

        let categories = self.fetch_categories(&mut *tx).await?;
        let shop_roots = match &request.scope {
            ShopScope::All => None,
            ShopScope::Shops(shops) => Some(self.fetch_shop_roots(&mut *tx, shops).await?),
        };
        let product_sales = self
            .fetch_product_sales(&mut *tx, &request.window, &request.scope)
            .await?;
        let page_views = self.fetch_page_views(&mut *tx, &request.window).await?;
        let products = reported_products(&product_sales, &page_views);
        let links = self.fetch_links(&mut *tx, &products).await?;

        tx.commit().await?;

        debug!(
            categories = categories.len(),
            links = links.len(),
            products_sold = product_sales.len(),
            page_views = page_views.len(),
            "Loaded catalog snapshot"
        );

        Ok(CatalogSnapshot {
            categories,
            links,
            product_sales,
            page_views,
            shop_roots,
        })
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::Database)
    }
}
