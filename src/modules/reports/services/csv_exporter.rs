use serde::Serialize;
use std::io::Write;

use crate::core::Result;
use crate::modules::reports::models::{ReportRow, SortColumn};

/// One exported line; field order is the column order of the file
#[derive(Debug, Serialize)]
struct CsvRecord {
    name: String,
    total_quantity_sold: u64,
    total_price_sold: String,
    total_wholesale_price_sold: String,
    total_page_viewed: u64,
}

impl From<&ReportRow> for CsvRecord {
    fn from(row: &ReportRow) -> Self {
        Self {
            name: row.display_name(),
            total_quantity_sold: row.total_quantity_sold,
            total_price_sold: format!("{:.2}", row.total_price_sold),
            total_wholesale_price_sold: format!("{:.2}", row.margin_amount()),
            total_page_viewed: row.total_page_viewed,
        }
    }
}

/// Write the full (unpaginated) report as CSV.
///
/// The header row is always present, also for an empty report. Names are the
/// undecorated breadcrumbs and amounts are raw decimals, not locale strings.
pub fn export_csv<W: Write>(rows: &[ReportRow], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(SortColumn::ALL.iter().map(|column| column.as_str()))?;
    for row in rows {
        wtr.serialize(CsvRecord::from(row))?;
    }
    wtr.flush()?;

    Ok(())
}

/// Export into an in-memory buffer
pub fn export_csv_bytes(rows: &[ReportRow]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    export_csv(rows, &mut buffer)?;
    Ok(buffer)
}
