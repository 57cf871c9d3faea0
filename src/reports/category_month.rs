//! Category by month table
//!
//! One row per month with a cell per category seen that month, followed by a
//! TOTALS row with each category's grand total over the whole range.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::models::{Category, Money};

use super::budget_items::BudgetItem;
use super::by_month::BudgetItemsByMonth;

/// Month label of the final row
pub const TOTALS_LABEL: &str = "TOTALS";

/// One category's share of a row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCell {
    pub category: String,
    /// Empty in the TOTALS row
    pub details: Vec<BudgetItem>,
    pub subtotal: Money,
}

/// A month row, or the closing TOTALS row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryMonthRow {
    pub month: String,
    pub total: Money,
    pub categories: Vec<CategoryCell>,
}

impl CategoryMonthRow {
    pub fn is_totals(&self) -> bool {
        self.month == TOTALS_LABEL
    }

    /// Look up a category's cell by name
    pub fn get(&self, category: &str) -> Option<&CategoryCell> {
        self.categories.iter().find(|cell| cell.category == category)
    }

    /// Subtotal for `category`, if it appears in this row
    pub fn subtotal(&self, category: &str) -> Option<Money> {
        self.get(category).map(|cell| cell.subtotal)
    }
}

/// Month rows followed by the TOTALS row
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryMonthReport {
    pub rows: Vec<CategoryMonthRow>,
}

impl CategoryMonthReport {
    /// All rows except TOTALS
    pub fn months(&self) -> &[CategoryMonthRow] {
        match self.rows.split_last() {
            Some((last, rest)) if last.is_totals() => rest,
            _ => &self.rows,
        }
    }

    pub fn totals(&self) -> Option<&CategoryMonthRow> {
        self.rows.last().filter(|row| row.is_totals())
    }

    /// Every category name appearing in any month row, alphabetically
    pub fn category_names(&self) -> Vec<String> {
        let names: std::collections::BTreeSet<&str> = self
            .months()
            .iter()
            .flat_map(|row| row.categories.iter().map(|cell| cell.category.as_str()))
            .collect();
        names.into_iter().map(str::to_string).collect()
    }
}

/// Build the table from month buckets
///
/// `categories` is the Category Store listing and fixes the TOTALS column
/// order. Categories with nothing in range are left out of TOTALS.
pub fn compose(months: Vec<BudgetItemsByMonth>, categories: &[Category]) -> CategoryMonthReport {
    let mut grand_totals: HashMap<String, Money> = HashMap::new();
    let mut rows = Vec::with_capacity(months.len() + 1);

    for month in months {
        let mut by_category: BTreeMap<String, Vec<BudgetItem>> = BTreeMap::new();
        for item in month.details {
            by_category.entry(item.category.clone()).or_default().push(item);
        }

        let cells = by_category
            .into_iter()
            .map(|(category, details)| {
                let subtotal: Money = details.iter().map(|item| item.amount).sum();
                *grand_totals.entry(category.clone()).or_default() += subtotal;
                CategoryCell {
                    category,
                    details,
                    subtotal,
                }
            })
            .collect();

        rows.push(CategoryMonthRow {
            month: month.month,
            total: month.total,
            categories: cells,
        });
    }

    let mut seen = HashSet::new();
    let totals: Vec<CategoryCell> = categories
        .iter()
        .filter(|category| seen.insert(category.description.as_str()))
        .filter_map(|category| {
            grand_totals.get(&category.description).map(|subtotal| CategoryCell {
                category: category.description.clone(),
                details: Vec::new(),
                subtotal: *subtotal,
            })
        })
        .collect();

    rows.push(CategoryMonthRow {
        month: TOTALS_LABEL.to_string(),
        total: totals.iter().map(|cell| cell.subtotal).sum(),
        categories: totals,
    });

    CategoryMonthReport { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::by_month::group_by_month;
    use crate::reports::query::ReportQuery;
    use crate::reports::test_support::{at, scenario_storage};

    fn scenario_report(query: ReportQuery) -> CategoryMonthReport {
        let (_temp_dir, storage) = scenario_storage();
        let months = group_by_month(&storage, &query).unwrap();
        let categories = storage.categories.get_all().unwrap();
        compose(months, &categories)
    }

    #[test]
    fn test_month_rows() {
        let report = scenario_report(ReportQuery::all());
        let months = report.months();
        assert_eq!(months.len(), 3);

        assert_eq!(months[0].month, "2018/01");
        assert_eq!(months[0].subtotal("Clothes"), Some(Money::from_units(10)));
        assert_eq!(months[0].subtotal("Credit Card"), Some(Money::from_units(-10)));
        assert_eq!(months[0].total, Money::zero());

        assert_eq!(months[1].categories.len(), 1);
        assert_eq!(months[1].subtotal("Clothes"), Some(Money::from_units(15)));
        assert_eq!(months[1].subtotal("Eating Out"), None);

        let names: Vec<_> = months[2].categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Credit Card", "Eating Out"]);
        assert_eq!(months[2].total, Money::from_units(55));
    }

    #[test]
    fn test_cells_keep_month_balances() {
        let report = scenario_report(ReportQuery::all());
        let eating_out = report.months()[2].get("Eating Out").unwrap();

        let balances: Vec<_> = eating_out.details.iter().map(|i| i.balance).collect();
        assert_eq!(balances, vec![Money::from_units(30), Money::from_units(55)]);
        assert_eq!(eating_out.subtotal, Money::from_units(70));
    }

    #[test]
    fn test_totals_row_in_store_order() {
        let report = scenario_report(ReportQuery::all());
        let totals = report.totals().unwrap();

        assert!(totals.is_totals());
        let names: Vec<_> = totals.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Credit Card", "Clothes", "Eating Out"]);
        assert_eq!(totals.subtotal("Credit Card"), Some(Money::from_units(-25)));
        assert_eq!(totals.subtotal("Clothes"), Some(Money::from_units(25)));
        assert_eq!(totals.subtotal("Eating Out"), Some(Money::from_units(70)));
        assert_eq!(totals.total, Money::from_units(70));
        assert!(totals.categories.iter().all(|c| c.details.is_empty()));
    }

    #[test]
    fn test_totals_equal_sum_of_month_subtotals() {
        let report = scenario_report(ReportQuery::all());
        let totals = report.totals().unwrap();

        for name in report.category_names() {
            let summed: Money = report
                .months()
                .iter()
                .filter_map(|row| row.subtotal(&name))
                .sum();
            assert_eq!(totals.subtotal(&name), Some(summed));
        }
    }

    #[test]
    fn test_totals_skip_categories_missing_from_listing() {
        let (_temp_dir, storage) = scenario_storage();
        let months = group_by_month(&storage, &ReportQuery::all()).unwrap();
        let categories: Vec<_> = storage
            .categories
            .get_all()
            .unwrap()
            .into_iter()
            .filter(|c| c.description != "Eating Out")
            .collect();

        let report = compose(months, &categories);
        assert_eq!(report.months()[2].subtotal("Eating Out"), Some(Money::from_units(70)));

        let totals = report.totals().unwrap();
        assert_eq!(totals.subtotal("Eating Out"), None);
        let names: Vec<_> = totals.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Credit Card", "Clothes"]);
        assert_eq!(totals.total, Money::zero());
    }

    #[test]
    fn test_totals_collapse_duplicate_names() {
        use crate::models::{Category, CategoryId, CategoryType};

        let (_temp_dir, storage) = scenario_storage();
        let months = group_by_month(&storage, &ReportQuery::all()).unwrap();
        let mut categories = storage.categories.get_all().unwrap();
        categories.push(Category::new(CategoryId::new(99), "Clothes", CategoryType::Expense));

        let totals = compose(months, &categories).totals().cloned().unwrap();
        let clothes: Vec<_> = totals
            .categories
            .iter()
            .filter(|c| c.category == "Clothes")
            .collect();
        assert_eq!(clothes.len(), 1);
        assert_eq!(clothes[0].subtotal, Money::from_units(25));
        assert_eq!(totals.total, Money::from_units(70));
    }

    #[test]
    fn test_empty_range_has_only_totals() {
        let report = scenario_report(ReportQuery::all().between(at(2030, 1, 1), at(2030, 2, 1)));

        assert_eq!(report.rows.len(), 1);
        assert!(report.months().is_empty());
        let totals = report.totals().unwrap();
        assert!(totals.categories.is_empty());
        assert_eq!(totals.total, Money::zero());
    }
}
