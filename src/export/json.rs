//! JSON export
//!
//! Full data export with schema versioning, plus pretty-printed report
//! output.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, Expense};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full data export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub categories: Vec<Category>,

    pub expenses: Vec<Expense>,

    pub metadata: ExportMetadata,
}

/// Summary counts for a quick look at an export file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub category_count: usize,
    pub expense_count: usize,
    pub earliest_expense: Option<String>,
    pub latest_expense: Option<String>,
}

impl FullExport {
    /// Snapshot both stores
    pub fn from_storage(storage: &Storage) -> BudgetResult<Self> {
        let categories = storage.categories.get_all()?;
        let expenses = storage.expenses.get_all()?;

        let metadata = ExportMetadata {
            category_count: categories.len(),
            expense_count: expenses.len(),
            earliest_expense: expenses.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_expense: expenses.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            categories,
            expenses,
            metadata,
        })
    }

    /// Check the schema version and that every expense has its category
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let category_ids: std::collections::HashSet<_> =
            self.categories.iter().map(|c| c.id).collect();
        for expense in &self.expenses {
            if !category_ids.contains(&expense.category_id) {
                return Err(format!(
                    "Expense {} references unknown category {}",
                    expense.id, expense.category_id
                ));
            }
        }

        Ok(())
    }
}

/// Export all categories and expenses to JSON
pub fn export_full_json<W: Write>(storage: &Storage, writer: W, pretty: bool) -> BudgetResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BudgetError::Export(e.to_string()))?;

    tracing::info!(
        categories = export.metadata.category_count,
        expenses = export.metadata.expense_count,
        "full export written"
    );
    Ok(())
}

/// Parse and validate a full JSON export
pub fn import_from_json(json_str: &str) -> BudgetResult<FullExport> {
    let export: FullExport = serde_json::from_str(json_str)?;
    export.validate().map_err(BudgetError::Validation)?;
    Ok(export)
}

/// Write any report shape as pretty JSON
pub fn write_report_json<T, W>(report: &T, mut writer: W) -> BudgetResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_json::to_writer_pretty(&mut writer, report)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}
