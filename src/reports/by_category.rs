//! Category grouping

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::Money;

use super::budget_items::BudgetItem;

/// Budget items sharing one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetItemsByCategory {
    pub category: String,
    pub details: Vec<BudgetItem>,
    pub total: Money,
}

/// Partition `items` by category description, groups in ordinal name order
///
/// Details keep the order of `items`, balances included.
pub fn group_by_category(items: Vec<BudgetItem>) -> Vec<BudgetItemsByCategory> {
    let mut groups: BTreeMap<String, Vec<BudgetItem>> = BTreeMap::new();
    for item in items {
        groups.entry(item.category.clone()).or_default().push(item);
    }

    groups
        .into_iter()
        .map(|(category, details)| {
            let total = details.iter().map(|item| item.amount).sum();
            BudgetItemsByCategory {
                category,
                details,
                total,
            }
        })
        .collect()
}
