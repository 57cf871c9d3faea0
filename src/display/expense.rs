//! Expense display formatting

use std::collections::HashMap;

use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{CategoryId, Expense};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Description")]
    description: String,
}

fn category_name(names: &HashMap<CategoryId, String>, id: CategoryId) -> String {
    names
        .get(&id)
        .cloned()
        .unwrap_or_else(|| format!("(unknown {})", id))
}

/// Format expenses as a table
pub fn format_expense_list(
    expenses: &[Expense],
    category_names: &HashMap<CategoryId, String>,
    date_format: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses found.\n".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.date.format(date_format).to_string(),
        category: category_name(category_names, e.category_id),
        amount: e.amount.to_string(),
        description: e.description.clone(),
    });

    let mut table = Table::new(rows);
    table
        .with(Style::rounded())
        .modify(Columns::single(3), Alignment::right());
    format!("{}\n", table)
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, category: Option<&str>) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense: {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date.format("%Y-%m-%d %H:%M:%S")));
    output.push_str(&format!("Amount:      {}\n", expense.amount));
    match category {
        Some(name) => output.push_str(&format!("Category:    {} ({})\n", name, expense.category_id)),
        None => output.push_str(&format!("Category:    {}\n", expense.category_id)),
    }
    if !expense.description.is_empty() {
        output.push_str(&format!("Description: {}\n", expense.description));
    }

    output
}
