use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::debug;

use super::sales_aggregator::roll_up_category_sales;
use super::traffic_aggregator::compute_category_page_views;
use super::tree_scope::resolve_visible_categories;
use crate::modules::reports::models::{
    Breadcrumb, CategoryId, CategoryNode, Pagination, ReportQuery, ReportRow, Sort, SortColumn,
    SortDirection,
};
use crate::modules::reports::repositories::CatalogSnapshot;

/// The filtered and sorted report, before pagination.
///
/// Both the page and the total count are derived from this one value, so
/// they can never disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedReport {
    rows: Vec<ReportRow>,
}

/// One page of the report plus the size of the whole filtered set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportPage {
    pub rows: Vec<ReportRow>,
    pub total_count: usize,
    pub offset: usize,
}

impl SortedReport {
    pub fn total_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<ReportRow> {
        self.rows
    }

    /// Apply LIMIT/OFFSET. An offset past the end yields an empty page.
    pub fn page(&self, page: &Pagination) -> ReportPage {
        let len = self.rows.len();
        let start = (page.offset as usize).min(len);
        let end = start.saturating_add(page.size as usize).min(len);

        ReportPage {
            rows: self.rows[start..end].to_vec(),
            total_count: len,
            offset: start,
        }
    }
}

/// Number of direct children of every category that has any
pub fn child_counts(categories: &[CategoryNode]) -> HashMap<CategoryId, usize> {
    let mut counts = HashMap::new();
    for category in categories {
        if category.parent_id != category.id {
            *counts.entry(category.parent_id).or_insert(0) += 1;
        }
    }
    counts
}

/// Keep rows of categories without child categories
pub fn filter_leaf_only(rows: Vec<ReportRow>) -> Vec<ReportRow> {
    rows.into_iter().filter(|row| !row.has_children).collect()
}

/// Value a row is ordered by; a name key is lower-cased once per row
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Text(String),
    Count(u64),
    Amount(Decimal),
}

impl SortKey {
    fn of(row: &ReportRow, column: SortColumn) -> Self {
        match column {
            SortColumn::Name => Self::Text(row.display_name().to_lowercase()),
            SortColumn::TotalQuantitySold => Self::Count(row.total_quantity_sold),
            SortColumn::TotalPriceSold => Self::Amount(row.total_price_sold),
            SortColumn::TotalWholeSalePriceSold => Self::Amount(row.margin_amount()),
            SortColumn::TotalPageViewed => Self::Count(row.total_page_viewed),
        }
    }
}

/// Sort by the requested column, ties by ascending category id
pub fn sort_rows(rows: &mut [ReportRow], sort: &Sort) {
    let column = sort.column;
    match sort.direction {
        SortDirection::Asc => {
            rows.sort_by_cached_key(|row| (SortKey::of(row, column), row.category_id))
        }
        SortDirection::Desc => {
            rows.sort_by_cached_key(|row| (Reverse(SortKey::of(row, column)), row.category_id))
        }
    }
}

/// Build the full report for `query` from one snapshot.
///
/// Every non-root category that survives the shop scope (and the leaf-only
/// filter when requested) gets a row, with zero metrics when it has no sales
/// or traffic.
pub fn assemble(
    snapshot: &CatalogSnapshot,
    query: &ReportQuery,
    product_page_type_id: u32,
) -> SortedReport {
    let visible = resolve_visible_categories(snapshot.shop_roots.as_ref(), &snapshot.categories);
    let children = child_counts(&snapshot.categories);

    let sales = roll_up_category_sales(&snapshot.product_sales, &snapshot.links);
    let views = compute_category_page_views(
        &query.window,
        &snapshot.page_views,
        &snapshot.links,
        product_page_type_id,
    );

    let mut rows: Vec<ReportRow> = snapshot
        .categories
        .iter()
        .filter(|category| !category.is_root() && visible.contains(category.id))
        .map(|category| {
            let totals = sales.get(&category.id).copied().unwrap_or_default();
            ReportRow {
                category_id: category.id,
                breadcrumb: Breadcrumb::new(
                    category.parent_name.clone(),
                    category.name.clone().unwrap_or_default(),
                ),
                total_quantity_sold: totals.quantity,
                total_price_sold: totals.revenue,
                total_wholesale_cost: totals.cost,
                total_page_viewed: views.get(&category.id).copied().unwrap_or(0),
                has_children: children.get(&category.id).copied().unwrap_or(0) > 0,
            }
        })
        .collect();

    if query.leaf_only {
        rows = filter_leaf_only(rows);
    }

    sort_rows(&mut rows, &query.sort);

    debug!(
        rows = rows.len(),
        sort = %query.sort.column,
        direction = %query.sort.direction,
        leaf_only = query.leaf_only,
        "Assembled best-categories report"
    );

    SortedReport { rows }
}
