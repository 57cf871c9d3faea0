//! CSV export
//!
//! Reports and the expense list written with the `csv` crate. Amounts are
//! plain decimals with two places; dates are `YYYY-MM-DD HH:MM:SS`.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::reports::{BudgetItem, BudgetItemsByCategory, BudgetItemsByMonth, CategoryMonthReport};
use crate::storage::Storage;

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ITEM_HEADER: [&str; 7] = [
    "Expense ID",
    "Category ID",
    "Category",
    "Date",
    "Amount",
    "Description",
    "Balance",
];

fn export_err(e: impl std::fmt::Display) -> BudgetError {
    BudgetError::Export(e.to_string())
}

fn item_record(item: &BudgetItem) -> [String; 7] {
    [
        item.expense_id.to_string(),
        item.category_id.to_string(),
        item.category.clone(),
        item.date.format(DATE_FORMAT).to_string(),
        item.amount.to_string(),
        item.short_description.clone(),
        item.balance.to_string(),
    ]
}

/// Export a flat budget item list
pub fn export_budget_items_csv<W: Write>(items: &[BudgetItem], writer: W) -> BudgetResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(ITEM_HEADER).map_err(export_err)?;
    for item in items {
        csv.write_record(item_record(item)).map_err(export_err)?;
    }
    csv.flush().map_err(export_err)?;
    Ok(())
}

/// Export month buckets, one line per item prefixed with its month
pub fn export_months_csv<W: Write>(months: &[BudgetItemsByMonth], writer: W) -> BudgetResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let header = std::iter::once("Month").chain(ITEM_HEADER);
    csv.write_record(header).map_err(export_err)?;

    for month in months {
        for item in &month.details {
            let record = std::iter::once(month.month.clone()).chain(item_record(item));
            csv.write_record(record).map_err(export_err)?;
        }
    }
    csv.flush().map_err(export_err)?;
    Ok(())
}

/// Export category groups, one line per item prefixed with its group
pub fn export_categories_csv<W: Write>(
    groups: &[BudgetItemsByCategory],
    writer: W,
) -> BudgetResult<()> {
    let mut csv = csv::Writer::from_writer(writer);
    let header = std::iter::once("Group").chain(ITEM_HEADER);
    csv.write_record(header).map_err(export_err)?;

    for group in groups {
        for item in &group.details {
            let record = std::iter::once(group.category.clone()).chain(item_record(item));
            csv.write_record(record).map_err(export_err)?;
        }
    }
    csv.flush().map_err(export_err)?;
    Ok(())
}

/// Export the category by month table as a grid of subtotals
///
/// Columns are `Month`, `Total` and then one per category; empty cells mean
/// the category had nothing that month.
pub fn export_category_month_csv<W: Write>(
    report: &CategoryMonthReport,
    writer: W,
) -> BudgetResult<()> {
    let mut names = report.category_names();
    if let Some(totals) = report.totals() {
        for cell in &totals.categories {
            if !names.contains(&cell.category) {
                names.push(cell.category.clone());
            }
        }
    }

    let mut csv = csv::Writer::from_writer(writer);
    let header = ["Month", "Total"]
        .into_iter()
        .map(str::to_string)
        .chain(names.iter().cloned());
    csv.write_record(header).map_err(export_err)?;

    for row in &report.rows {
        let cells = names.iter().map(|name| {
            row.subtotal(name)
                .map(|subtotal| subtotal.to_string())
                .unwrap_or_default()
        });
        let record = [row.month.clone(), row.total.to_string()]
            .into_iter()
            .chain(cells);
        csv.write_record(record).map_err(export_err)?;
    }
    csv.flush().map_err(export_err)?;
    Ok(())
}

/// Export every stored expense in id order
pub fn export_expenses_csv<W: Write>(storage: &Storage, writer: W) -> BudgetResult<()> {
    let names: HashMap<_, _> = storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.description))
        .collect();

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(["ID", "Date", "Category", "Amount", "Description"])
        .map_err(export_err)?;

    for expense in storage.expenses.get_all()? {
        let category = names
            .get(&expense.category_id)
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string());
        csv.write_record([
            expense.id.to_string(),
            expense.date.format(DATE_FORMAT).to_string(),
            category,
            expense.amount.to_string(),
            expense.description,
        ])
        .map_err(export_err)?;
    }
    csv.flush().map_err(export_err)?;
    Ok(())
}
