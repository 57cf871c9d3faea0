//! Export module for HomeBudget
//!
//! - CSV: report tables and the expense list (spreadsheet-compatible)
//! - JSON: reports and the full data export
//! - YAML: reports and the full data export, human-readable

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{
    export_budget_items_csv, export_categories_csv, export_category_month_csv,
    export_expenses_csv, export_months_csv,
};
pub use json::{export_full_json, import_from_json, write_report_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml, write_report_yaml};
