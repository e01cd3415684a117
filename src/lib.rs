//! Category sales statistics
//!
//! Builds the "best categories" report for a shop catalog: per-category sales
//! quantity, revenue, margin and product page views over a date window, served
//! as a paginated JSON grid or a CSV export.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::reports;
pub use modules::reports::{ReportQuery, ReportRow, ReportService};
