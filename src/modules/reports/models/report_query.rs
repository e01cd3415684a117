use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::category::ShopId;
use crate::config::ReportConfig;
use crate::core::{AppError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Inclusive reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct DateWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

/// Unchecked wire form of a [`DateWindow`]
#[derive(Deserialize)]
struct WindowBounds {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TryFrom<WindowBounds> for DateWindow {
    type Error = AppError;

    fn try_from(bounds: WindowBounds) -> Result<Self> {
        Self::new(bounds.start, bounds.end)
    }
}

impl DateWindow {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end < start {
            return Err(AppError::validation(format!(
                "date window end ({}) is before its start ({})",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// Whole days: `start 00:00:00` through `end 23:59:59`
    pub fn from_dates(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        Self::new(start.and_time(NaiveTime::MIN), end_of_day(end))
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Inclusive on both bounds
    pub fn contains(&self, at: NaiveDateTime) -> bool {
        at >= self.start && at <= self.end
    }

    /// True when both endpoints of `[from, to]` fall inside the window
    pub fn covers(&self, from: NaiveDateTime, to: NaiveDateTime) -> bool {
        self.contains(from) && self.contains(to)
    }

    /// Parse a `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS` pair.
    /// A bare end date extends to the last second of that day.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let start = parse_bound(start, "date_from", false)?;
        let end = parse_bound(end, "date_to", true)?;
        Self::new(start, end)
    }
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // 23:59:59 always exists
    date.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN))
}

fn parse_bound(raw: &str, field: &str, is_end: bool) -> Result<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, DATETIME_FORMAT) {
        return Ok(at);
    }
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        AppError::validation(format!(
            "Invalid {} format: '{}'. Expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS",
            field, raw
        ))
    })?;
    Ok(if is_end {
        end_of_day(date)
    } else {
        date.and_time(NaiveTime::MIN)
    })
}

/// Sortable report columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortColumn {
    #[serde(rename = "name")]
    Name,
    #[serde(rename = "totalQuantitySold")]
    TotalQuantitySold,
    #[serde(rename = "totalPriceSold")]
    TotalPriceSold,
    #[serde(rename = "totalWholeSalePriceSold")]
    TotalWholeSalePriceSold,
    #[serde(rename = "totalPageViewed")]
    TotalPageViewed,
}

impl SortColumn {
    /// Display order of the report columns
    pub const ALL: [SortColumn; 5] = [
        SortColumn::Name,
        SortColumn::TotalQuantitySold,
        SortColumn::TotalPriceSold,
        SortColumn::TotalWholeSalePriceSold,
        SortColumn::TotalPageViewed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Name => "name",
            SortColumn::TotalQuantitySold => "totalQuantitySold",
            SortColumn::TotalPriceSold => "totalPriceSold",
            SortColumn::TotalWholeSalePriceSold => "totalWholeSalePriceSold",
            SortColumn::TotalPageViewed => "totalPageViewed",
        }
    }

    pub fn header(&self) -> &'static str {
        match self {
            SortColumn::Name => "Name",
            SortColumn::TotalQuantitySold => "Total Quantity Sold",
            SortColumn::TotalPriceSold => "Total Price",
            SortColumn::TotalWholeSalePriceSold => "Total Margin",
            SortColumn::TotalPageViewed => "Total Viewed",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        SortColumn::ALL
            .into_iter()
            .find(|column| column.as_str() == s.trim())
            .ok_or_else(|| AppError::validation(format!("Unknown sort column: '{}'", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(AppError::validation(format!(
                "Unknown sort direction: '{}'. Expected ASC or DESC",
                s
            ))),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("ASC"),
            SortDirection::Desc => f.write_str("DESC"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new(SortColumn::TotalPriceSold, SortDirection::Desc)
    }
}

/// LIMIT/OFFSET window over the sorted report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub offset: u32,
    pub size: u32,
}

impl Pagination {
    pub fn new(offset: u32, size: u32) -> Result<Self> {
        if size == 0 {
            return Err(AppError::validation("limit must be greater than 0"));
        }
        Ok(Self { offset, size })
    }
}

/// Which storefronts' category trees are visible
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShopScope {
    /// No restriction
    All,
    /// Restricted to the category trees of these shops; an empty set shows nothing
    Shops(BTreeSet<ShopId>),
}

impl ShopScope {
    pub fn is_restricted(&self) -> bool {
        matches!(self, ShopScope::Shops(_))
    }
}

/// Validated report request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportQuery {
    pub window: DateWindow,
    pub scope: ShopScope,
    pub leaf_only: bool,
    pub sort: Sort,
    pub page: Pagination,
}

impl ReportQuery {
    pub fn new(window: DateWindow) -> Self {
        Self {
            window,
            scope: ShopScope::All,
            leaf_only: false,
            sort: Sort::default(),
            page: Pagination {
                offset: 0,
                size: ReportConfig::default().default_page_size,
            },
        }
    }

    pub fn with_scope(mut self, scope: ShopScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_leaf_only(mut self, leaf_only: bool) -> Self {
        self.leaf_only = leaf_only;
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: Pagination) -> Self {
        self.page = page;
        self
    }

    /// Validate untyped request parameters. Nothing reaches the store unless
    /// every field passes.
    pub fn try_from_params(params: &RawReportParams, config: &ReportConfig) -> Result<Self> {
        let date_from = required(&params.date_from, "date_from")?;
        let date_to = required(&params.date_to, "date_to")?;
        let window = DateWindow::parse(date_from, date_to)?;

        let scope = match params.shop_ids.as_deref() {
            None => ShopScope::All,
            Some(raw) => ShopScope::Shops(parse_shop_ids(raw)?),
        };

        let leaf_only = parse_flag(params.only_children.as_deref(), "only_children")?;

        let column = match present(&params.sort) {
            Some(raw) => raw.parse()?,
            None => Sort::default().column,
        };
        let direction = match present(&params.direction) {
            Some(raw) => raw.parse()?,
            None => Sort::default().direction,
        };

        let offset = match present(&params.start) {
            Some(raw) => parse_unsigned(raw, "start")?,
            None => 0,
        };
        let size = match present(&params.limit) {
            Some(raw) => parse_unsigned(raw, "limit")?,
            None => config.default_page_size,
        };
        if size > config.max_page_size {
            return Err(AppError::validation(format!(
                "limit {} exceeds the maximum page size {}",
                size, config.max_page_size
            )));
        }

        Ok(Self {
            window,
            scope,
            leaf_only,
            sort: Sort::new(column, direction),
            page: Pagination::new(offset, size)?,
        })
    }
}

/// Query-string view of a report request, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReportParams {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    /// Comma-separated shop ids; present-but-empty restricts to nothing
    pub shop_ids: Option<String>,
    pub only_children: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub start: Option<String>,
    pub limit: Option<String>,
    pub export: Option<String>,
}

impl RawReportParams {
    pub fn wants_export(&self) -> Result<bool> {
        parse_flag(self.export.as_deref(), "export")
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
    present(value).ok_or_else(|| AppError::validation(format!("{} is required", field)))
}

fn parse_unsigned(raw: &str, field: &str) -> Result<u32> {
    raw.parse::<u32>().map_err(|_| {
        AppError::validation(format!(
            "{} must be a non-negative integer, got '{}'",
            field, raw
        ))
    })
}

fn parse_flag(raw: Option<&str>, field: &str) -> Result<bool> {
    match raw.map(str::trim) {
        None | Some("") | Some("0") | Some("false") => Ok(false),
        Some("1") | Some("true") => Ok(true),
        Some(other) => Err(AppError::validation(format!(
            "{} must be 0 or 1, got '{}'",
            field, other
        ))),
    }
}

fn parse_shop_ids(raw: &str) -> Result<BTreeSet<ShopId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| parse_unsigned(part, "shop_ids"))
        .collect()
}
