pub mod csv_exporter;
pub mod report_assembler;
pub mod report_service;
pub mod sales_aggregator;
pub mod traffic_aggregator;
pub mod tree_scope;

pub use csv_exporter::{export_csv, export_csv_bytes};
pub use report_assembler::{assemble, filter_leaf_only, ReportPage, SortedReport};
pub use report_service::ReportService;
pub use sales_aggregator::{
    compute_category_sales, compute_product_sales, roll_up_category_sales, unit_cost,
    ProductSalesAccumulator,
};
pub use traffic_aggregator::compute_category_page_views;
pub use tree_scope::{resolve_visible_categories, VisibleCategories};
