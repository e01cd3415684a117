pub mod category;
pub mod page_view;
pub mod report_query;
pub mod report_row;
pub mod sale_line;

pub use category::{
    CategoryId, CategoryNode, CategoryProductLink, ProductId, ShopId, ROOT_CATEGORY_ID,
};
pub use page_view::PageViewCounter;
pub use report_query::{
    DateWindow, Pagination, RawReportParams, ReportQuery, ShopScope, Sort, SortColumn,
    SortDirection,
};
pub use report_row::{Breadcrumb, ReportRow};
pub use sale_line::{SaleLine, SalesTotals};
