mod report_controller;

pub use report_controller::{
    configure, get_best_categories, BestCategoriesResponse, ReportRowResponse,
};
