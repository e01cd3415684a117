use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub type CategoryId = u32;
pub type ProductId = u32;
pub type ShopId = u32;

/// Catalog root; never part of a report
pub const ROOT_CATEGORY_ID: CategoryId = 1;

/// A category with its nested-set bounds and localized names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CategoryNode {
    #[sqlx(rename = "id_category")]
    pub id: CategoryId,
    #[sqlx(rename = "id_parent")]
    pub parent_id: CategoryId,
    #[sqlx(rename = "nleft")]
    pub nested_left: u32,
    #[sqlx(rename = "nright")]
    pub nested_right: u32,
    pub name: Option<String>,
    pub parent_name: Option<String>,
}

impl CategoryNode {
    /// Interval containment: true when `other` lies in this node's subtree.
    /// Reflexive, so a node contains itself.
    pub fn contains(&self, other: &CategoryNode) -> bool {
        other.nested_left >= self.nested_left && other.nested_right <= self.nested_right
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_CATEGORY_ID
    }
}

/// Many-to-many association between categories and products
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, FromRow)]
pub struct CategoryProductLink {
    #[sqlx(rename = "id_category")]
    pub category_id: CategoryId,
    #[sqlx(rename = "id_product")]
    pub product_id: ProductId,
}

impl CategoryProductLink {
    pub fn new(category_id: CategoryId, product_id: ProductId) -> Self {
        Self {
            category_id,
            product_id,
        }
    }
}
