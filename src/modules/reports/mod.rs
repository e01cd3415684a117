pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{ReportQuery, ReportRow};
pub use repositories::{CatalogStore, InMemoryCatalogStore, MySqlCatalogStore};
pub use services::ReportService;
