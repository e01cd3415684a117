use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::category::{ProductId, ShopId};

/// One order line item joined with its order, variant and product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SaleLine {
    pub order_id: u32,
    pub shop_id: ShopId,
    pub product_id: ProductId,
    pub variant_id: Option<u32>,
    pub quantity: u32,
    pub unit_price_tax_excl: Decimal,
    /// Wholesale price captured when the order was placed
    pub original_wholesale_price: Option<Decimal>,
    pub variant_wholesale_price: Option<Decimal>,
    pub product_wholesale_price: Option<Decimal>,
    /// Order currency -> reporting currency divisor
    pub conversion_rate: Decimal,
    pub order_valid: bool,
    pub invoice_date: NaiveDateTime,
}

/// Sales totals for one product or one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalesTotals {
    pub quantity: u64,
    pub revenue: Decimal,
    /// Sum of wholesale cost of the units sold
    pub cost: Decimal,
}

impl SalesTotals {
    pub fn add(&mut self, other: &SalesTotals) {
        self.quantity += other.quantity;
        self.revenue += other.revenue;
        self.cost += other.cost;
    }
}
