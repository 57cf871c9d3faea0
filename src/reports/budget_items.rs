//! Budget item assembly
//!
//! Joins expenses with their category names and computes the running balance
//! over the selected sequence.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryId, ExpenseId, Money};
use crate::storage::Storage;

use super::query::ReportQuery;

/// One expense flattened for display, with its running balance
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetItem {
    pub expense_id: ExpenseId,
    pub category_id: CategoryId,
    /// Category description at the time of the report
    pub category: String,
    pub date: NaiveDateTime,
    pub amount: Money,
    pub short_description: String,
    /// Sum of `amount` over this item and every item before it in the same
    /// result list
    pub balance: Money,
}

/// Overwrite `balance` with the running sum of `amount`, in slice order
pub fn apply_running_balance(items: &mut [BudgetItem]) {
    let mut balance = Money::zero();
    for item in items {
        balance += item.amount;
        item.balance = balance;
    }
}

/// Select, join, order and balance the expenses matching `query`
///
/// Ordering is by date; expenses on the same instant keep store order. The
/// balance only covers the selected expenses, so a category-filtered run is a
/// running total of that category alone.
pub(crate) fn assemble(storage: &Storage, query: &ReportQuery) -> BudgetResult<Vec<BudgetItem>> {
    let filter = query.category_filter();
    if let Some(category_id) = filter {
        if storage.categories.get(category_id)?.is_none() {
            return Err(BudgetError::invalid_category_reference(category_id));
        }
    }

    let names: HashMap<CategoryId, String> = storage
        .categories
        .get_all()?
        .into_iter()
        .map(|c| (c.id, c.description))
        .collect();

    let mut expenses = storage
        .expenses
        .get_in_range(query.start_bound(), query.end_bound())?;
    if let Some(category_id) = filter {
        expenses.retain(|e| e.category_id == category_id);
    }
    // stable, so equal dates keep id order
    expenses.sort_by_key(|e| e.date);

    let mut items = expenses
        .into_iter()
        .map(|expense| {
            let category = names
                .get(&expense.category_id)
                .cloned()
                .ok_or_else(|| BudgetError::invalid_category_reference(expense.category_id))?;
            Ok(BudgetItem {
                expense_id: expense.id,
                category_id: expense.category_id,
                category,
                date: expense.date,
                amount: expense.amount,
                short_description: expense.description,
                balance: Money::zero(),
            })
        })
        .collect::<BudgetResult<Vec<_>>>()?;

    apply_running_balance(&mut items);
    Ok(items)
}
