//! CLI commands for data export

use std::io::Write;
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::error::BudgetResult;
use crate::export::{csv, json, yaml};
use crate::storage::Storage;

use super::create_output;

/// Full export format
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// JSON (machine-readable)
    Json,
    /// YAML (human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export all categories and expenses
    All {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export expenses to CSV
    Expenses {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show what an export would contain without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> BudgetResult<()> {
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_output(&output)?;
            match format {
                ExportFormat::Json => json::export_full_json(storage, &mut writer, pretty)?,
                ExportFormat::Yaml => yaml::export_full_yaml(storage, &mut writer)?,
            }
            writer.flush()?;
            println!("Full data exported to: {}", output.display());
        }

        ExportCommands::Expenses { output } => {
            let mut writer = create_output(&output)?;
            csv::export_expenses_csv(storage, &mut writer)?;
            writer.flush()?;
            let count = storage.expenses.count()?;
            println!("Exported {} expenses to: {}", count, output.display());
        }

        ExportCommands::Info => {
            let export = json::FullExport::from_storage(storage)?;

            println!("Export Information");
            println!("==================\n");
            println!("Schema Version: {}", export.schema_version);
            println!("App Version:    {}", export.app_version);
            println!();
            println!("Data Summary:");
            println!("  Categories: {}", export.metadata.category_count);
            println!("  Expenses:   {}", export.metadata.expense_count);

            if let Some(earliest) = &export.metadata.earliest_expense {
                println!("\nExpense Date Range:");
                println!("  Earliest: {}", earliest);
            }
            if let Some(latest) = &export.metadata.latest_expense {
                println!("  Latest:   {}", latest);
            }
        }
    }

    Ok(())
}
