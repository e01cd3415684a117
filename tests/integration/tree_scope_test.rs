// Shop-scoped reports: nested-set containment and shop order filtering

#[path = "../helpers/mod.rs"]
mod helpers;

use std::collections::BTreeSet;

use category_stats::reports::models::{Pagination, ReportQuery, ShopScope};
use category_stats::reports::services::{resolve_visible_categories, VisibleCategories};
use helpers::*;
use rust_decimal_macros::dec;

fn shops(ids: &[u32]) -> ShopScope {
    ShopScope::Shops(ids.iter().copied().collect())
}

fn query(scope: ShopScope) -> ReportQuery {
    ReportQuery::new(january_2024())
        .with_scope(scope)
        .with_page(Pagination::new(0, 100).unwrap())
}

async fn report_ids(scope: ShopScope) -> Vec<u32> {
    let service = report_service(sample_catalog_store());
    service
        .best_categories(&query(scope))
        .await
        .unwrap()
        .rows
        .iter()
        .map(|row| row.category_id)
        .collect()
}

#[tokio::test]
async fn test_second_shop_sees_its_subtree_and_orders() {
    let service = report_service(sample_catalog_store());

    let page = service.best_categories(&query(shops(&[2]))).await.unwrap();
    let ids: Vec<u32> = page.rows.iter().map(|row| row.category_id).collect();

    assert_eq!(ids, vec![7, 8, 6]);
    assert_eq!(page.rows[0].total_price_sold, dec!(50.00));
    assert_eq!(page.rows[1].total_price_sold, dec!(12.50));
}

#[tokio::test]
async fn test_first_shop_excludes_other_shop_orders() {
    let service = report_service(sample_catalog_store());

    let page = service.best_categories(&query(shops(&[1]))).await.unwrap();
    let bags = page.rows.iter().find(|row| row.category_id == 7).unwrap();

    // Bags is inside shop 1's tree but only sold through shop 2
    assert_eq!(page.total_count, 8);
    assert_eq!(bags.total_quantity_sold, 0);
    assert_eq!(
        page.rows.iter().map(|row| row.category_id).collect::<Vec<_>>(),
        vec![3, 4, 5, 2, 6, 7, 8, 9]
    );
}

#[tokio::test]
async fn test_several_shops_union_their_trees() {
    assert_eq!(report_ids(shops(&[1, 2])).await, report_ids(ShopScope::All).await);
    assert_eq!(report_ids(shops(&[2, 2])).await, vec![7, 8, 6]);
}

#[tokio::test]
async fn test_empty_restriction_shows_nothing() {
    assert!(report_ids(shops(&[])).await.is_empty());
    // shop without a root category
    assert!(report_ids(shops(&[9])).await.is_empty());
}

#[tokio::test]
async fn test_leaf_only_within_shop() {
    let service = report_service(sample_catalog_store());

    let page = service
        .best_categories(&query(shops(&[2])).with_leaf_only(true))
        .await
        .unwrap();

    assert_eq!(page.total_count, 2);
    assert!(page.rows.iter().all(|row| row.category_id == 7 || row.category_id == 8));
}

#[test]
fn test_containment_over_nested_intervals() {
    let tree = vec![
        category(1, 0, 1, 18, "Root", None),
        category(2, 1, 2, 17, "Home", Some("Root")),
        category(3, 2, 3, 8, "Clothes", Some("Home")),
        category(4, 3, 4, 5, "Men", Some("Clothes")),
        category(5, 3, 6, 7, "Women", Some("Clothes")),
        category(6, 2, 9, 14, "Accessories", Some("Home")),
        category(7, 6, 10, 11, "Bags", Some("Accessories")),
        category(8, 6, 12, 13, "Hats", Some("Accessories")),
    ];

    let roots: BTreeSet<u32> = [3, 7].into_iter().collect();
    let visible = resolve_visible_categories(Some(&roots), &tree);
    let mut ids: Vec<u32> = (1..=8).filter(|id| visible.contains(*id)).collect();
    ids.sort();
    assert_eq!(ids, vec![3, 4, 5, 7]);

    assert_eq!(resolve_visible_categories(None, &tree), VisibleCategories::All);

    let unknown: BTreeSet<u32> = [42].into_iter().collect();
    assert!(!resolve_visible_categories(Some(&unknown), &tree).contains(2));
}
