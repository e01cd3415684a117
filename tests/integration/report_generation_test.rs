// End-to-end report generation against the in-memory catalog store

#[path = "../helpers/mod.rs"]
mod helpers;

use category_stats::core::AppError;
use category_stats::reports::models::{Pagination, ReportQuery, Sort, SortColumn, SortDirection};
use helpers::*;
use rust_decimal_macros::dec;

fn ids(page: &category_stats::reports::services::ReportPage) -> Vec<u32> {
    page.rows.iter().map(|row| row.category_id).collect()
}

fn all_rows(sort: Sort) -> ReportQuery {
    ReportQuery::new(january_2024())
        .with_sort(sort)
        .with_page(Pagination::new(0, 100).unwrap())
}

#[tokio::test]
async fn test_single_order_scenario() {
    let service = report_service(scenario_store());

    let page = service
        .best_categories(&ReportQuery::new(january_2024()))
        .await
        .unwrap();

    assert_eq!(page.total_count, 2);
    let row = &page.rows[0];
    assert_eq!(row.category_id, SCENARIO_CATEGORY);
    assert_eq!(row.total_quantity_sold, 3);
    assert_eq!(row.total_price_sold, dec!(60.00));
    assert_eq!(row.total_wholesale_cost, dec!(15.00));
    assert_eq!(row.margin_amount(), dec!(45.00));
    assert_eq!(row.total_page_viewed, 10);
    assert!(!row.has_children);
    assert_eq!(row.display_name(), "Home > Clothes");
}

#[tokio::test]
async fn test_categories_without_activity_are_zero_filled() {
    let service = report_service(scenario_store());

    let page = service
        .best_categories(&ReportQuery::new(january_2024()))
        .await
        .unwrap();

    let home = &page.rows[1];
    assert_eq!(home.category_id, 2);
    assert_eq!(home.total_quantity_sold, 0);
    assert_eq!(home.total_price_sold, dec!(0));
    assert_eq!(home.total_page_viewed, 0);
    assert!(home.has_children);
}

#[tokio::test]
async fn test_root_category_never_reported() {
    let service = report_service(sample_catalog_store());

    let page = service
        .best_categories(&all_rows(Sort::default()))
        .await
        .unwrap();

    assert_eq!(page.total_count, 8);
    assert!(page.rows.iter().all(|row| row.category_id != 1));
}

#[tokio::test]
async fn test_default_sort_is_revenue_descending() {
    let service = report_service(sample_catalog_store());

    let page = service
        .best_categories(&all_rows(Sort::default()))
        .await
        .unwrap();

    // Clothes and Men tie on 60.00; zero rows fall back to id order
    assert_eq!(ids(&page), vec![3, 4, 7, 5, 8, 2, 6, 9]);
}

#[tokio::test]
async fn test_sales_respect_validity_window_and_rate() {
    let service = report_service(sample_catalog_store());

    let page = service
        .best_categories(&all_rows(Sort::default()))
        .await
        .unwrap();
    let find = |id| page.rows.iter().find(|row| row.category_id == id).unwrap();

    // cancelled order and February order are ignored
    assert_eq!(find(4).total_quantity_sold, 2);
    assert_eq!(find(5).total_quantity_sold, 1);
    // variant wholesale price beats the product price
    assert_eq!(find(5).total_wholesale_cost, dec!(20.00));
    // 25.00 at conversion rate 2
    assert_eq!(find(8).total_price_sold, dec!(12.50));
    // counter straddling the window start is not counted
    assert_eq!(find(8).total_page_viewed, 0);
    assert_eq!(find(7).total_page_viewed, 3);
}

#[tokio::test]
async fn test_product_in_several_categories_counts_for_each() {
    let service = report_service(sample_catalog_store());

    let page = service
        .best_categories(&all_rows(Sort::default()))
        .await
        .unwrap();

    let clothes = page.rows.iter().find(|row| row.category_id == 3).unwrap();
    let men = page.rows.iter().find(|row| row.category_id == 4).unwrap();
    assert_eq!(clothes.total_price_sold, men.total_price_sold);
    assert_eq!(clothes.total_page_viewed, 7);
    assert_eq!(men.total_page_viewed, 7);
}

#[tokio::test]
async fn test_sort_by_every_column() {
    let service = report_service(sample_catalog_store());

    let cases = [
        (SortColumn::Name, SortDirection::Asc, vec![7, 8, 4, 5, 6, 3, 9, 2]),
        (SortColumn::TotalQuantitySold, SortDirection::Asc, vec![2, 6, 9, 5, 8, 3, 4, 7]),
        (SortColumn::TotalWholeSalePriceSold, SortDirection::Desc, vec![3, 4, 7, 5, 8, 2, 6, 9]),
        (SortColumn::TotalPageViewed, SortDirection::Desc, vec![3, 4, 7, 2, 5, 6, 8, 9]),
    ];

    for (column, direction, expected) in cases {
        let page = service
            .best_categories(&all_rows(Sort::new(column, direction)))
            .await
            .unwrap();
        assert_eq!(ids(&page), expected, "sorting by {} {}", column, direction);
    }
}

#[tokio::test]
async fn test_leaf_only_report() {
    let service = report_service(sample_catalog_store());

    let page = service
        .best_categories(&all_rows(Sort::default()).with_leaf_only(true))
        .await
        .unwrap();

    assert_eq!(ids(&page), vec![4, 7, 5, 8, 9]);
    assert!(page.rows.iter().all(|row| !row.has_children));
}

#[tokio::test]
async fn test_unavailable_store_is_retryable() {
    let service = report_service(sample_catalog_store().unavailable());

    let err = service
        .best_categories(&ReportQuery::new(january_2024()))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Database(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_window_without_orders_yields_zero_rows() {
    let service = report_service(sample_catalog_store());
    let window = category_stats::reports::models::DateWindow::parse("2023-06-01", "2023-06-30")
        .unwrap();

    let page = service
        .best_categories(&ReportQuery::new(window))
        .await
        .unwrap();

    assert_eq!(page.total_count, 8);
    assert!(page
        .rows
        .iter()
        .all(|row| row.total_quantity_sold == 0 && row.total_page_viewed == 0));
}
