use actix_web::{http::header, web, HttpResponse};
use serde::Serialize;
use tracing::error;

use crate::core::{PriceFormatter, Result};
use crate::modules::reports::models::{RawReportParams, ReportQuery, ReportRow, Sort, SortColumn};
use crate::modules::reports::services::{ReportPage, ReportService};

const EXPORT_FILENAME: &str = "best_categories.csv";

/// Column metadata for the grid
#[derive(Debug, Serialize)]
pub struct ColumnResponse {
    pub id: &'static str,
    pub header: &'static str,
    pub align: &'static str,
}

impl From<SortColumn> for ColumnResponse {
    fn from(column: SortColumn) -> Self {
        let align = match column {
            SortColumn::Name => "left",
            SortColumn::TotalPriceSold => "right",
            _ => "center",
        };
        Self {
            id: column.as_str(),
            header: column.header(),
            align,
        }
    }
}

/// One grid row: raw values plus their display forms
#[derive(Debug, Serialize)]
pub struct ReportRowResponse {
    pub id_category: u32,
    /// Breadcrumb decorated with folder/bullet markers
    pub name: String,
    pub plain_name: String,
    #[serde(rename = "totalQuantitySold")]
    pub total_quantity_sold: u64,
    #[serde(rename = "totalPriceSold")]
    pub total_price_sold: String, // Decimal as string for JSON precision
    #[serde(rename = "totalPriceSoldFormatted")]
    pub total_price_sold_formatted: String,
    /// Margin amount: revenue minus wholesale cost
    #[serde(rename = "totalWholeSalePriceSold")]
    pub total_wholesale_price_sold: String,
    #[serde(rename = "totalWholeSalePriceSoldFormatted")]
    pub total_wholesale_price_sold_formatted: String,
    #[serde(rename = "totalPageViewed")]
    pub total_page_viewed: u64,
    #[serde(rename = "hasChildren")]
    pub has_children: bool,
}

/// "Displaying {from} - {to} of {total}"
#[derive(Debug, Serialize)]
pub struct PagingResponse {
    pub from: usize,
    pub to: usize,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct BestCategoriesResponse {
    pub currency: String,
    pub columns: Vec<ColumnResponse>,
    pub default_sort_column: &'static str,
    pub default_sort_direction: String,
    pub rows: Vec<ReportRowResponse>,
    pub total_count: usize,
    pub paging: PagingResponse,
}

impl ReportRowResponse {
    fn from_row(row: &ReportRow, service: &ReportService, formatter: &dyn PriceFormatter) -> Self {
        let currency = service.config().currency;
        let margin = row.margin_amount();
        Self {
            id_category: row.category_id,
            name: row.decorated_name(),
            plain_name: row.display_name(),
            total_quantity_sold: row.total_quantity_sold,
            total_price_sold: format!("{:.2}", row.total_price_sold),
            total_price_sold_formatted: formatter.format_price(row.total_price_sold, currency),
            total_wholesale_price_sold: format!("{:.2}", margin),
            total_wholesale_price_sold_formatted: formatter.format_price(margin, currency),
            total_page_viewed: row.total_page_viewed,
            has_children: row.has_children,
        }
    }
}

impl PagingResponse {
    fn from_page(page: &ReportPage) -> Self {
        if page.rows.is_empty() {
            return Self {
                from: 0,
                to: 0,
                total: page.total_count,
            };
        }
        Self {
            from: page.offset + 1,
            to: page.offset + page.rows.len(),
            total: page.total_count,
        }
    }
}

/// GET /reports/best-categories
///
/// Returns one page of the best-categories grid as JSON, or the whole sorted
/// report as a CSV attachment when `export=1`.
pub async fn get_best_categories(
    service: web::Data<ReportService>,
    formatter: web::Data<dyn PriceFormatter>,
    params: web::Query<RawReportParams>,
) -> Result<HttpResponse> {
    handle_get_best_categories(&service, formatter.get_ref(), &params)
        .await
        .inspect_err(|e| error!("Failed to generate best-categories report: {}", e))
}

async fn handle_get_best_categories(
    service: &ReportService,
    formatter: &dyn PriceFormatter,
    params: &RawReportParams,
) -> Result<HttpResponse> {
    let export = params.wants_export()?;
    let query = ReportQuery::try_from_params(params, service.config())?;

    if export {
        let csv = service.export_best_categories(&query).await?;
        return Ok(HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ))
            .body(csv));
    }

    let page = service.best_categories(&query).await?;
    let default_sort = Sort::default();

    let response = BestCategoriesResponse {
        currency: service.config().currency.to_string(),
        columns: SortColumn::ALL.into_iter().map(ColumnResponse::from).collect(),
        default_sort_column: default_sort.column.as_str(),
        default_sort_direction: default_sort.direction.to_string(),
        rows: page
            .rows
            .iter()
            .map(|row| ReportRowResponse::from_row(row, service, formatter))
            .collect(),
        total_count: page.total_count,
        paging: PagingResponse::from_page(&page),
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Configure routes for reports module
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports").route("/best-categories", web::get().to(get_best_categories)),
    );
}
