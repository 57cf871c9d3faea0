//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service and report layers.

pub mod category;
pub mod expense;
pub mod export;
pub mod report;

pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use report::{handle_report_command, ReportCommands};

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{BudgetError, BudgetResult};
use crate::models::Category;
use crate::services::CategoryService;
use crate::storage::Storage;

const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

fn invalid_date(input: &str) -> BudgetError {
    BudgetError::Validation(format!(
        "Invalid date: {}. Use YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS]",
        input
    ))
}

/// Parse a date or date-time; a bare date means the start of that day
pub fn parse_date_time(input: &str) -> BudgetResult<NaiveDateTime> {
    let input = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .ok_or_else(|| invalid_date(input))
}

/// Parse the upper bound of a range; a bare date means the end of that day
pub fn parse_end_date_time(input: &str) -> BudgetResult<NaiveDateTime> {
    let trimmed = input.trim();
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => date
            .succ_opt()
            .map(|next| next.and_time(NaiveTime::MIN) - chrono::Duration::nanoseconds(1))
            .ok_or_else(|| invalid_date(trimmed)),
        Err(_) => parse_date_time(trimmed),
    }
}

/// Look up a category by name or id, failing if it does not exist
pub fn resolve_category(storage: &Storage, identifier: &str) -> BudgetResult<Category> {
    CategoryService::new(storage)
        .find(identifier)?
        .ok_or_else(|| BudgetError::category_not_found(identifier))
}

/// Look up the category an expense or a report filter points at
///
/// A miss is an invalid reference, as in the expense and report services.
pub fn resolve_category_reference(storage: &Storage, identifier: &str) -> BudgetResult<Category> {
    CategoryService::new(storage)
        .find(identifier)?
        .ok_or_else(|| BudgetError::invalid_category_reference(identifier.trim()))
}

/// Open `path` for writing, buffered
pub(crate) fn create_output(path: &Path) -> BudgetResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BudgetError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}
