//! Budget reports for HomeBudget
//!
//! Four views over the same selection of expenses: a flat list with running
//! balance, month buckets, category groups, and a category by month table.
//! All of them are read-only.

pub mod budget_items;
pub mod by_category;
pub mod by_month;
pub mod category_month;
pub mod query;

pub use budget_items::{apply_running_balance, BudgetItem};
pub use by_category::{group_by_category, BudgetItemsByCategory};
pub use by_month::{month_label, month_span, BudgetItemsByMonth};
pub use category_month::{CategoryCell, CategoryMonthReport, CategoryMonthRow, TOTALS_LABEL};
pub use query::ReportQuery;

use crate::error::BudgetResult;
use crate::storage::Storage;

/// Report generator over an open [`Storage`]
///
/// Each call issues its own sequence of store reads, so a report is not a
/// consistent snapshot if the stores change in between.
pub struct BudgetReports<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetReports<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Matching expenses in date order, with a running balance
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn budget_items(&self, query: &ReportQuery) -> BudgetResult<Vec<BudgetItem>> {
        let items = budget_items::assemble(self.storage, query)?;
        tracing::debug!(items = items.len(), "budget items assembled");
        Ok(items)
    }

    /// One bucket per month, balances restarting in each
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn budget_items_by_month(
        &self,
        query: &ReportQuery,
    ) -> BudgetResult<Vec<BudgetItemsByMonth>> {
        let months = by_month::group_by_month(self.storage, query)?;
        tracing::debug!(months = months.len(), "budget items grouped by month");
        Ok(months)
    }

    /// One group per category, alphabetically
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn budget_items_by_category(
        &self,
        query: &ReportQuery,
    ) -> BudgetResult<Vec<BudgetItemsByCategory>> {
        let items = budget_items::assemble(self.storage, query)?;
        let groups = group_by_category(items);
        tracing::debug!(groups = groups.len(), "budget items grouped by category");
        Ok(groups)
    }

    /// Month rows split by category, then a TOTALS row
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn budget_dictionary_by_category_and_month(
        &self,
        query: &ReportQuery,
    ) -> BudgetResult<CategoryMonthReport> {
        let months = by_month::group_by_month(self.storage, query)?;
        let categories = self.storage.categories.get_all()?;
        let report = category_month::compose(months, &categories);
        tracing::debug!(rows = report.rows.len(), "category by month table composed");
        Ok(report)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, NaiveDateTime};
    use tempfile::TempDir;

    use crate::config::paths::BudgetPaths;
    use crate::models::{CategoryId, Money};
    use crate::services::{ExpenseInput, ExpenseService};
    use crate::storage::{initialize_storage, Storage};

    pub fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// Default categories plus six expenses across three months
    pub fn scenario_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths).unwrap();
        let storage = Storage::open(paths).unwrap();

        let service = ExpenseService::new(&storage);
        for (date, category, units) in [
            (at(2018, 1, 10), 10, 10),
            (at(2018, 1, 11), 9, -10),
            (at(2019, 1, 10), 10, 15),
            (at(2020, 1, 10), 9, -15),
            (at(2020, 1, 11), 14, 45),
            (at(2020, 1, 12), 14, 25),
        ] {
            service
                .add(ExpenseInput::new(
                    date,
                    CategoryId::new(category),
                    Money::from_units(units),
                    "",
                ))
                .unwrap();
        }

        (temp_dir, storage)
    }
}
