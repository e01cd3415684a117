pub mod catalog_store;
pub mod memory_catalog_store;
pub mod mysql_catalog_store;

pub use catalog_store::{reported_products, CatalogSnapshot, CatalogStore, SnapshotRequest};
pub use memory_catalog_store::InMemoryCatalogStore;
pub use mysql_catalog_store::MySqlCatalogStore;
