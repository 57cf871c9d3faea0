//! CLI commands for budget reports

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;

use crate::config::settings::Settings;
use crate::display::report::{
    format_budget_items, format_budget_items_by_category, format_budget_items_by_month,
    format_category_month, format_header, separator,
};
use crate::error::BudgetResult;
use crate::export::{csv, json, yaml};
use crate::reports::{BudgetReports, ReportQuery};
use crate::storage::Storage;

use super::{create_output, parse_date_time, parse_end_date_time, resolve_category_reference};

const HEADER_WIDTH: usize = 60;

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Tables for the terminal
    #[default]
    Terminal,
    Csv,
    Json,
    Yaml,
}

/// Range, filter and output options shared by every report
#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Start date, inclusive (YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS])
    #[arg(short, long)]
    pub start: Option<String>,

    /// End date, inclusive; a bare date covers that whole day
    #[arg(short, long)]
    pub end: Option<String>,

    /// Only expenses in this category (name or ID)
    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: ReportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Expenses in date order with a running balance
    Items(ReportArgs),

    /// Expenses bucketed by month, balance restarting each month
    #[command(name = "by-month")]
    ByMonth(ReportArgs),

    /// Expenses grouped by category
    #[command(name = "by-category")]
    ByCategory(ReportArgs),

    /// Per-month subtotals for each category, with a TOTALS row
    #[command(name = "by-category-month")]
    ByCategoryMonth(ReportArgs),
}

impl ReportArgs {
    /// Turn the raw arguments into a query, resolving the category name
    pub fn to_query(&self, storage: &Storage) -> BudgetResult<ReportQuery> {
        let start = self.start.as_deref().map(parse_date_time).transpose()?;
        let end = self.end.as_deref().map(parse_end_date_time).transpose()?;

        let mut query = ReportQuery::new(start, end, false, Default::default());
        if let Some(identifier) = &self.category {
            query = query.category(resolve_category_reference(storage, identifier)?.id);
        }
        Ok(query)
    }
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> BudgetResult<()> {
    let reports = BudgetReports::new(storage);
    let date_format = settings.date_format.as_str();

    match cmd {
        ReportCommands::Items(args) => {
            let items = reports.budget_items(&args.to_query(storage)?)?;
            emit(
                &args,
                "Budget Items",
                &items,
                || format_budget_items(&items, date_format),
                |w| csv::export_budget_items_csv(&items, w),
            )
        }
        ReportCommands::ByMonth(args) => {
            let months = reports.budget_items_by_month(&args.to_query(storage)?)?;
            emit(
                &args,
                "Budget Items by Month",
                &months,
                || format_budget_items_by_month(&months, date_format),
                |w| csv::export_months_csv(&months, w),
            )
        }
        ReportCommands::ByCategory(args) => {
            let groups = reports.budget_items_by_category(&args.to_query(storage)?)?;
            emit(
                &args,
                "Budget Items by Category",
                &groups,
                || format_budget_items_by_category(&groups, date_format),
                |w| csv::export_categories_csv(&groups, w),
            )
        }
        ReportCommands::ByCategoryMonth(args) => {
            let report = reports.budget_dictionary_by_category_and_month(&args.to_query(storage)?)?;
            emit(
                &args,
                "Category by Month",
                &report,
                || format_category_month(&report),
                |w| csv::export_category_month_csv(&report, w),
            )
        }
    }
}

fn range_line(args: &ReportArgs) -> String {
    let start = args.start.as_deref().unwrap_or("beginning");
    let end = args.end.as_deref().unwrap_or("now");
    match &args.category {
        Some(category) => format!("{} to {}, category {}", start, end, category),
        None => format!("{} to {}", start, end),
    }
}

fn emit<T, F, C>(
    args: &ReportArgs,
    title: &str,
    report: &T,
    terminal: F,
    write_csv: C,
) -> BudgetResult<()>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
    C: FnOnce(&mut dyn Write) -> BudgetResult<()>,
{
    let mut writer: Box<dyn Write> = match args.output.as_deref() {
        Some(path) => Box::new(create_output(path)?),
        None => Box::new(std::io::stdout().lock()),
    };

    match args.format {
        ReportFormat::Terminal => {
            writeln!(writer, "{}", format_header(title, HEADER_WIDTH))?;
            writeln!(writer, "{}", format_header(&range_line(args), HEADER_WIDTH))?;
            writeln!(writer, "{}", separator(HEADER_WIDTH))?;
            write!(writer, "{}", terminal())?;
        }
        ReportFormat::Csv => write_csv(writer.as_mut())?,
        ReportFormat::Json => json::write_report_json(report, &mut writer)?,
        ReportFormat::Yaml => yaml::write_report_yaml(report, &mut writer)?,
    }
    writer.flush()?;

    if let Some(path) = args.output.as_deref() {
        report_written(path);
    }
    Ok(())
}

fn report_written(path: &Path) {
    eprintln!("Report written to: {}", path.display());
}
