use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::CategoryId;

const FOLDER_MARKER: &str = "<i class=\"icon-folder-open\"></i>";
const LEAF_MARKER: &str = "&bull;";

/// `"{parent} > {name}"` label of a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub parent_name: Option<String>,
    pub name: String,
}

impl Breadcrumb {
    pub fn new(parent_name: Option<String>, name: impl Into<String>) -> Self {
        Self {
            parent_name,
            name: name.into(),
        }
    }

    /// Undecorated label, as exported
    pub fn plain(&self) -> String {
        match &self.parent_name {
            Some(parent) => format!("{} > {}", parent.trim(), self.name.trim()),
            None => self.name.trim().to_string(),
        }
    }

    /// Label with folder/bullet markers for the interactive grid.
    /// Categories with children get a folder, leaves get a bullet.
    pub fn decorated(&self, has_children: bool) -> String {
        let marker = if has_children {
            FOLDER_MARKER
        } else {
            LEAF_MARKER
        };
        match &self.parent_name {
            Some(parent) => format!(
                "{} {} > {} {}",
                FOLDER_MARKER,
                parent.trim(),
                marker,
                self.name.trim()
            ),
            None => format!("{} {}", marker, self.name.trim()),
        }
    }
}

/// One category line of the best-categories report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub category_id: CategoryId,
    pub breadcrumb: Breadcrumb,
    pub total_quantity_sold: u64,
    /// Revenue excluding tax, in the reporting currency, 2 dp
    pub total_price_sold: Decimal,
    /// Wholesale cost of the units sold, in the reporting currency, 2 dp
    pub total_wholesale_cost: Decimal,
    pub total_page_viewed: u64,
    pub has_children: bool,
}

impl ReportRow {
    pub fn display_name(&self) -> String {
        self.breadcrumb.plain()
    }

    pub fn decorated_name(&self) -> String {
        self.breadcrumb.decorated(self.has_children)
    }

    /// Amount of margin shown as `totalWholeSalePriceSold`: revenue minus cost
    pub fn margin_amount(&self) -> Decimal {
        self.total_price_sold - self.total_wholesale_cost
    }
}
