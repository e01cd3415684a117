// Property tests for report amount rounding
//
// Category aggregates are rounded half-up to 2 dp exactly once, after all
// line items have been summed.

use category_stats::core::currency::round_report_amount;
use category_stats::reports::models::{CategoryProductLink, DateWindow, SaleLine};
use category_stats::reports::services::compute_category_sales;
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn window() -> DateWindow {
    DateWindow::from_dates(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
    )
    .unwrap()
}

fn sale(order_id: u32, unit_price: Decimal, rate: Decimal) -> SaleLine {
    SaleLine {
        order_id,
        shop_id: 1,
        product_id: 42,
        variant_id: None,
        quantity: 1,
        unit_price_tax_excl: unit_price,
        original_wholesale_price: None,
        variant_wholesale_price: None,
        product_wholesale_price: None,
        conversion_rate: rate,
        order_valid: true,
        invoice_date: NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    }
}

proptest! {
    #[test]
    fn test_rounded_amount_has_two_places(units in 0i64..10_000_000_000, scale in 0u32..8) {
        let amount = Decimal::new(units, scale);
        let rounded = round_report_amount(amount);

        prop_assert!(rounded.scale() <= 2);
        prop_assert!((rounded - amount).abs() <= Decimal::new(5, 3));
    }

    #[test]
    fn test_rounding_is_idempotent(units in 0i64..10_000_000_000, scale in 0u32..8) {
        let once = round_report_amount(Decimal::new(units, scale));
        prop_assert_eq!(round_report_amount(once), once);
    }

    #[test]
    fn test_midpoint_rounds_up(cents in 0i64..10_000_000) {
        // cents + 0.5 cent
        let amount = Decimal::new(cents * 10 + 5, 3);
        prop_assert_eq!(round_report_amount(amount), Decimal::new(cents + 1, 2));
    }

    #[test]
    fn test_category_revenue_is_rounded_sum_of_lines(
        prices in prop::collection::vec((1i64..100_000, 1i64..40), 1..12)
    ) {
        let lines: Vec<SaleLine> = prices
            .iter()
            .enumerate()
            .map(|(i, (cents, rate_tenths))| {
                sale(i as u32 + 1, Decimal::new(*cents, 2), Decimal::new(*rate_tenths, 1))
            })
            .collect();
        let links = vec![CategoryProductLink::new(5, 42)];

        let raw_sum: Decimal = lines
            .iter()
            .map(|line| line.unit_price_tax_excl / line.conversion_rate)
            .sum();

        let totals = compute_category_sales(&window(), &lines, &links);
        prop_assert_eq!(totals[&5].revenue, round_report_amount(raw_sum));
        prop_assert_eq!(totals[&5].quantity, lines.len() as u64);
    }
}

#[test]
fn test_half_cents_are_not_lost_per_line() {
    // Two lines of 5.0025 each: rounding per line would give 10.00
    let lines = vec![
        sale(1, Decimal::new(50025, 4), Decimal::ONE),
        sale(2, Decimal::new(50025, 4), Decimal::ONE),
    ];
    let links = vec![CategoryProductLink::new(5, 42)];

    let totals = compute_category_sales(&window(), &lines, &links);
    assert_eq!(totals[&5].revenue, Decimal::new(1001, 2));
}
