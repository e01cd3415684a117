use std::collections::HashMap;
use tracing::debug;

use crate::modules::reports::models::{
    CategoryId, CategoryProductLink, DateWindow, PageViewCounter, ProductId,
};

/// Total product page views per category over `window`.
///
/// A counter counts only when it belongs to a product detail page, its object
/// id resolves to a product linked to the category, and both ends of its
/// recorded date range fall inside the window. Categories without matching
/// counters are simply absent (read as 0).
pub fn compute_category_page_views(
    window: &DateWindow,
    counters: &[PageViewCounter],
    links: &[CategoryProductLink],
    product_page_type_id: u32,
) -> HashMap<CategoryId, u64> {
    let mut product_views: HashMap<ProductId, u64> = HashMap::new();
    for counter in counters {
        if counter.page_type_id != product_page_type_id
            || !window.covers(counter.time_start, counter.time_end)
        {
            continue;
        }
        if let Some(product_id) = counter.product_id() {
            *product_views.entry(product_id).or_default() += u64::from(counter.count);
        }
    }

    let mut views: HashMap<CategoryId, u64> = HashMap::new();
    for link in links {
        if let Some(count) = product_views.get(&link.product_id) {
            *views.entry(link.category_id).or_default() += count;
        }
    }

    debug!(
        products = product_views.len(),
        categories = views.len(),
        "Computed category page views"
    );

    views
}
