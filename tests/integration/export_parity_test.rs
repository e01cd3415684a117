// The CSV export carries exactly the rows of the unpaginated report

#[path = "../helpers/mod.rs"]
mod helpers;

use category_stats::reports::models::{Pagination, ReportQuery, ShopScope};
use category_stats::reports::InMemoryCatalogStore;
use helpers::*;

const HEADER: [&str; 5] = [
    "name",
    "totalQuantitySold",
    "totalPriceSold",
    "totalWholeSalePriceSold",
    "totalPageViewed",
];

fn read_records(csv_bytes: &[u8]) -> (csv::StringRecord, Vec<csv::StringRecord>) {
    let mut reader = csv::Reader::from_reader(csv_bytes);
    let header = reader.headers().unwrap().clone();
    let records = reader.records().map(|r| r.unwrap()).collect();
    (header, records)
}

#[tokio::test]
async fn test_scenario_export() {
    let service = report_service(scenario_store());

    let csv_bytes = service
        .export_best_categories(&ReportQuery::new(january_2024()))
        .await
        .unwrap();
    let text = String::from_utf8(csv_bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines,
        vec![
            "name,totalQuantitySold,totalPriceSold,totalWholeSalePriceSold,totalPageViewed",
            "Home > Clothes,3,60.00,45.00,10",
            "Root > Home,0,0.00,0.00,0",
        ]
    );
}

#[tokio::test]
async fn test_export_matches_report_rows() {
    let service = report_service(sample_catalog_store());
    let query = ReportQuery::new(january_2024()).with_page(Pagination::new(0, 1000).unwrap());

    let page = service.best_categories(&query).await.unwrap();
    let (header, records) = read_records(&service.export_best_categories(&query).await.unwrap());

    assert_eq!(header.iter().collect::<Vec<_>>(), HEADER);
    assert_eq!(records.len(), page.total_count);

    for (record, row) in records.iter().zip(&page.rows) {
        assert_eq!(&record[0], row.display_name());
        assert_eq!(record[1].parse::<u64>().unwrap(), row.total_quantity_sold);
        assert_eq!(&record[2], format!("{:.2}", row.total_price_sold));
        assert_eq!(&record[3], format!("{:.2}", row.margin_amount()));
        assert_eq!(record[4].parse::<u64>().unwrap(), row.total_page_viewed);
    }
}

#[tokio::test]
async fn test_export_ignores_pagination() {
    let service = report_service(sample_catalog_store());
    let query = ReportQuery::new(january_2024()).with_page(Pagination::new(3, 2).unwrap());

    let (_, records) = read_records(&service.export_best_categories(&query).await.unwrap());
    assert_eq!(records.len(), 8);
    assert_eq!(&records[0][0], "Home > Clothes");
}

#[tokio::test]
async fn test_export_follows_filters() {
    let service = report_service(sample_catalog_store());
    let query = ReportQuery::new(january_2024())
        .with_scope(ShopScope::Shops([2].into_iter().collect()))
        .with_leaf_only(true);

    let (_, records) = read_records(&service.export_best_categories(&query).await.unwrap());
    let names: Vec<&str> = records.iter().map(|r| &r[0]).collect();
    assert_eq!(names, vec!["Accessories > Bags", "Accessories > Hats"]);
}

#[tokio::test]
async fn test_empty_export_keeps_header() {
    let service = report_service(InMemoryCatalogStore::default());

    let (header, records) = read_records(
        &service
            .export_best_categories(&ReportQuery::new(january_2024()))
            .await
            .unwrap(),
    );
    assert_eq!(header.len(), 5);
    assert!(records.is_empty());
}
