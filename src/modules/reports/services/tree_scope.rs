use std::collections::{BTreeSet, HashSet};
use tracing::warn;

use crate::modules::reports::models::{CategoryId, CategoryNode};

/// Categories a report is allowed to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisibleCategories {
    /// No shop restriction; nothing is filtered
    All,
    /// Only these categories; may be empty
    Only(HashSet<CategoryId>),
}

impl VisibleCategories {
    pub fn contains(&self, id: CategoryId) -> bool {
        match self {
            VisibleCategories::All => true,
            VisibleCategories::Only(ids) => ids.contains(&id),
        }
    }
}

/// Resolve the categories visible under a shop restriction.
///
/// `shop_roots == None` means no restriction is active. Otherwise a category
/// is visible when its nested-set interval lies inside the interval of at
/// least one root (union over roots). An empty root set yields an empty
/// result, never `All`.
pub fn resolve_visible_categories(
    shop_roots: Option<&BTreeSet<CategoryId>>,
    categories: &[CategoryNode],
) -> VisibleCategories {
    let Some(roots) = shop_roots else {
        return VisibleCategories::All;
    };

    let root_nodes: Vec<&CategoryNode> = roots
        .iter()
        .filter_map(|root_id| {
            let node = categories.iter().find(|c| c.id == *root_id);
            if node.is_none() {
                warn!(category_id = root_id, "Shop root category not found in tree");
            }
            node
        })
        .collect();

    let visible = categories
        .iter()
        .filter(|category| root_nodes.iter().any(|root| root.contains(category)))
        .map(|category| category.id)
        .collect();

    VisibleCategories::Only(visible)
}
