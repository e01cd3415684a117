use std::sync::Arc;
use tracing::{info, warn};

use super::csv_exporter::export_csv_bytes;
use super::report_assembler::{assemble, ReportPage, SortedReport};
use crate::config::ReportConfig;
use crate::core::Result;
use crate::modules::reports::models::ReportQuery;
use crate::modules::reports::repositories::{CatalogStore, SnapshotRequest};

/// Service producing the best-categories report
///
/// Holds no state between calls: every invocation reads a fresh snapshot and
/// recomputes all rows from it.
pub struct ReportService {
    store: Arc<dyn CatalogStore>,
    config: ReportConfig,
}

impl ReportService {
    /// Create a new report service over an injected store
    pub fn new(store: Arc<dyn CatalogStore>, config: ReportConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Readiness of the underlying store
    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }

    async fn sorted_report(&self, query: &ReportQuery) -> Result<SortedReport> {
        let request = SnapshotRequest {
            window: query.window,
            scope: query.scope.clone(),
        };

        let snapshot = self.store.load_snapshot(&request).await?;
        Ok(assemble(&snapshot, query, self.config.product_page_type_id))
    }

    /// One page of the report plus the total number of rows
    pub async fn best_categories(&self, query: &ReportQuery) -> Result<ReportPage> {
        info!(
            start = %query.window.start(),
            end = %query.window.end(),
            leaf_only = query.leaf_only,
            restricted = query.scope.is_restricted(),
            offset = query.page.offset,
            limit = query.page.size,
            "Generating best-categories report"
        );

        let report = self.sorted_report(query).await?;
        let page = report.page(&query.page);

        if page.total_count == 0 {
            warn!(
                "Empty best-categories report for period {} to {}",
                query.window.start(),
                query.window.end()
            );
        }

        Ok(page)
    }

    /// The whole sorted report as CSV, ignoring pagination
    pub async fn export_best_categories(&self, query: &ReportQuery) -> Result<Vec<u8>> {
        let rows = self.sorted_report(query).await?.into_rows();
        let csv = export_csv_bytes(&rows)?;

        info!(
            rows = rows.len(),
            bytes = csv.len(),
            "Exported best-categories report"
        );

        Ok(csv)
    }
}
