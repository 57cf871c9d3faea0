//! Report formatting for terminal output
//!
//! One renderer per report shape. Month and category groups print a heading,
//! an item table and a total line.

use tabled::builder::Builder;
use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use crate::reports::{BudgetItem, BudgetItemsByCategory, BudgetItemsByMonth, CategoryMonthReport};

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Format a header line with padding
pub fn format_header(title: &str, width: usize) -> String {
    let padding = width.saturating_sub(title.len()) / 2;
    format!("{}{}", " ".repeat(padding), title)
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

/// Truncate a string to a maximum number of characters with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

fn item_table(items: &[BudgetItem], date_format: &str) -> String {
    let rows = items.iter().map(|item| ItemRow {
        date: item.date.format(date_format).to_string(),
        category: item.category.clone(),
        description: truncate(&item.short_description, 40),
        amount: item.amount.to_string(),
        balance: item.balance.to_string(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::new(3..), Alignment::right());
    table.to_string()
}

/// Format the flat budget item list
pub fn format_budget_items(items: &[BudgetItem], date_format: &str) -> String {
    if items.is_empty() {
        return "No expenses in range.\n".to_string();
    }
    format!("{}\n", item_table(items, date_format))
}

/// Format month buckets
pub fn format_budget_items_by_month(months: &[BudgetItemsByMonth], date_format: &str) -> String {
    if months.is_empty() {
        return "No expenses in range.\n".to_string();
    }

    let mut output = String::new();
    for month in months {
        output.push_str(&format!("{}\n", month.month));
        output.push_str(&item_table(&month.details, date_format));
        output.push_str(&format!("\nTotal: {}\n\n", month.total));
    }
    output
}

/// Format category groups
pub fn format_budget_items_by_category(
    groups: &[BudgetItemsByCategory],
    date_format: &str,
) -> String {
    if groups.is_empty() {
        return "No expenses in range.\n".to_string();
    }

    let mut output = String::new();
    for group in groups {
        output.push_str(&format!("{}\n", group.category));
        output.push_str(&item_table(&group.details, date_format));
        output.push_str(&format!("\nTotal: {}\n\n", group.total));
    }
    output
}

/// Format the category by month table as a subtotal grid
pub fn format_category_month(report: &CategoryMonthReport) -> String {
    if report.months().is_empty() {
        return "No expenses in range.\n".to_string();
    }

    let mut names = report.category_names();
    if let Some(totals) = report.totals() {
        for cell in &totals.categories {
            if !names.contains(&cell.category) {
                names.push(cell.category.clone());
            }
        }
    }

    let mut builder = Builder::default();
    builder.push_record(
        ["Month", "Total"]
            .into_iter()
            .map(str::to_string)
            .chain(names.iter().cloned()),
    );
    for row in &report.rows {
        let cells = names.iter().map(|name| {
            row.subtotal(name)
                .map(|subtotal| subtotal.to_string())
                .unwrap_or_default()
        });
        builder.push_record([row.month.clone(), row.total.to_string()].into_iter().chain(cells));
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right());
    format!("{}\n", table)
}
