use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::core::currency::round_report_amount;
use crate::modules::reports::models::{
    CategoryId, CategoryProductLink, DateWindow, ProductId, SaleLine, SalesTotals,
};

fn non_zero(price: Option<Decimal>) -> Option<Decimal> {
    price.filter(|p| !p.is_zero())
}

/// Unit wholesale cost of a line item.
///
/// Precedence: price captured on the order line, then the variant's
/// wholesale price, then the product's catalog wholesale price. Zero or
/// missing prices fall through; when every tier is empty the cost is zero.
pub fn unit_cost(line: &SaleLine) -> Decimal {
    non_zero(line.original_wholesale_price)
        .or_else(|| non_zero(line.variant_wholesale_price))
        .or_else(|| non_zero(line.product_wholesale_price))
        .unwrap_or(Decimal::ZERO)
}

/// Revenue and cost of one line item, converted with its own order's rate.
///
/// Returns `None` for a non-positive conversion rate: the line still counts
/// toward quantity but carries no money.
pub fn converted_amounts(line: &SaleLine) -> Option<(Decimal, Decimal)> {
    if line.conversion_rate <= Decimal::ZERO {
        return None;
    }
    let quantity = Decimal::from(line.quantity);
    let revenue = (line.unit_price_tax_excl * quantity).checked_div(line.conversion_rate)?;
    let cost = (unit_cost(line) * quantity).checked_div(line.conversion_rate)?;
    Some((revenue, cost))
}

/// Running per-product totals, fed one line item at a time.
///
/// Stores fold line items into it while reading them, so a report never holds
/// more than one entry per product in memory.
#[derive(Debug, Clone)]
pub struct ProductSalesAccumulator {
    window: DateWindow,
    totals: HashMap<ProductId, SalesTotals>,
}

impl ProductSalesAccumulator {
    pub fn new(window: DateWindow) -> Self {
        Self {
            window,
            totals: HashMap::new(),
        }
    }

    /// Count a line item if its order is valid and invoiced inside the window
    pub fn add(&mut self, line: &SaleLine) {
        if !line.order_valid || !self.window.contains(line.invoice_date) {
            return;
        }

        let entry = self.totals.entry(line.product_id).or_default();
        entry.quantity += u64::from(line.quantity);

        match converted_amounts(line) {
            Some((revenue, cost)) => {
                entry.revenue += revenue;
                entry.cost += cost;
            }
            None => warn!(
                order_id = line.order_id,
                product_id = line.product_id,
                conversion_rate = %line.conversion_rate,
                "Skipping amounts of line item with unusable conversion rate"
            ),
        }
    }

    /// Unrounded totals keyed by product
    pub fn finish(self) -> HashMap<ProductId, SalesTotals> {
        self.totals
    }
}

/// Per-product quantity, revenue and cost over valid orders invoiced in `window`.
/// Amounts are left unrounded.
pub fn compute_product_sales(
    window: &DateWindow,
    lines: &[SaleLine],
) -> HashMap<ProductId, SalesTotals> {
    let mut sales = ProductSalesAccumulator::new(*window);
    for line in lines {
        sales.add(line);
    }
    sales.finish()
}

/// Roll product totals up to categories.
///
/// A product linked to several categories contributes its full totals to
/// each of them. Revenue and cost are rounded half-up to 2 dp once, on the
/// category aggregate.
pub fn roll_up_category_sales(
    product_sales: &HashMap<ProductId, SalesTotals>,
    links: &[CategoryProductLink],
) -> HashMap<CategoryId, SalesTotals> {
    let mut totals: HashMap<CategoryId, SalesTotals> = HashMap::new();

    for link in links {
        if let Some(product) = product_sales.get(&link.product_id) {
            totals.entry(link.category_id).or_default().add(product);
        }
    }

    for category in totals.values_mut() {
        category.revenue = round_report_amount(category.revenue);
        category.cost = round_report_amount(category.cost);
    }

    debug!(
        products = product_sales.len(),
        categories = totals.len(),
        "Computed category sales"
    );

    totals
}

/// Category sales straight from line items
pub fn compute_category_sales(
    window: &DateWindow,
    lines: &[SaleLine],
    links: &[CategoryProductLink],
) -> HashMap<CategoryId, SalesTotals> {
    roll_up_category_sales(&compute_product_sales(window, lines), links)
}
