//! YAML export
//!
//! Human-readable variants of the JSON exports.

use std::io::Write;

use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::FullExport;
use crate::storage::Storage;

fn export_err(e: impl std::fmt::Display) -> BudgetError {
    BudgetError::Export(e.to_string())
}

/// Export all categories and expenses to YAML
pub fn export_full_yaml<W: Write>(storage: &Storage, mut writer: W) -> BudgetResult<()> {
    let export = FullExport::from_storage(storage)?;

    writeln!(writer, "# HomeBudget Full Data Export").map_err(export_err)?;
    writeln!(writer, "# Generated: {}", export.exported_at).map_err(export_err)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    serde_yaml::to_writer(writer, &export).map_err(export_err)?;
    Ok(())
}

/// Parse and validate a full YAML export
pub fn import_from_yaml(yaml_str: &str) -> BudgetResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| BudgetError::Validation(e.to_string()))?;
    export.validate().map_err(BudgetError::Validation)?;
    Ok(export)
}

/// Write any report shape as YAML
pub fn write_report_yaml<T, W>(report: &T, writer: W) -> BudgetResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_yaml::to_writer(writer, report).map_err(export_err)
}
