//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json, with a
//! category index used for referential checks.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDateTime;

use crate::error::BudgetError;
use crate::models::{CategoryId, Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
    /// Id the next insert receives; never moves backwards
    #[serde(default)]
    next_id: ExpenseId,
}

fn lock_error(e: impl std::fmt::Display) -> BudgetError {
    BudgetError::StorageUnavailable(format!("Failed to acquire expense lock: {}", e))
}

/// Repository for expense persistence with a category index
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<ExpenseId, Expense>>,
    /// Index: category_id -> expense_ids
    by_category: RwLock<HashMap<CategoryId, Vec<ExpenseId>>>,
    next_id: RwLock<ExpenseId>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
            by_category: RwLock::new(HashMap::new()),
            next_id: RwLock::new(ExpenseId::new(1)),
        }
    }

    /// Load expenses from disk and rebuild the index
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;
        let mut next_id = self.next_id.write().map_err(lock_error)?;

        data.clear();
        by_category.clear();

        for expense in file_data.expenses {
            by_category
                .entry(expense.category_id)
                .or_default()
                .push(expense.id);
            data.insert(expense.id, expense);
        }
        *next_id = data
            .keys()
            .next_back()
            .map(ExpenseId::next)
            .into_iter()
            .chain([file_data.next_id, ExpenseId::new(1)])
            .max()
            .unwrap_or(ExpenseId::new(1));

        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let data = self.data.read().map_err(lock_error)?;
        let file_data = ExpenseData {
            expenses: data.values().cloned().collect(),
            next_id: *self.next_id.read().map_err(lock_error)?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, BudgetError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Get all expenses in id order
    pub fn get_all(&self) -> Result<Vec<Expense>, BudgetError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.values().cloned().collect())
    }

    /// Get expenses dated within `[start, end]`, in id order
    pub fn get_in_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Expense>, BudgetError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data
            .values()
            .filter(|e| e.date >= start && e.date <= end)
            .cloned()
            .collect())
    }

    /// Get expenses for a category, in id order
    pub fn get_by_category(&self, category_id: CategoryId) -> Result<Vec<Expense>, BudgetError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_category = self.by_category.read().map_err(lock_error)?;

        let mut ids = by_category
            .get(&category_id)
            .cloned()
            .unwrap_or_default();
        ids.sort();
        Ok(ids.iter().filter_map(|id| data.get(id).cloned()).collect())
    }

    /// Number of expenses booked against a category
    pub fn count_by_category(&self, category_id: CategoryId) -> Result<usize, BudgetError> {
        let by_category = self.by_category.read().map_err(lock_error)?;
        Ok(by_category.get(&category_id).map_or(0, Vec::len))
    }

    /// Insert a new expense under a fresh id
    ///
    /// Ids of deleted expenses are not handed out again.
    pub fn insert_with<F>(&self, build: F) -> Result<Expense, BudgetError>
    where
        F: FnOnce(ExpenseId) -> Expense,
    {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;
        let mut next_id = self.next_id.write().map_err(lock_error)?;

        let expense = build(*next_id);
        *next_id = (*next_id).max(expense.id.next());

        by_category
            .entry(expense.category_id)
            .or_default()
            .push(expense.id);
        data.insert(expense.id, expense.clone());
        Ok(expense)
    }

    /// Insert or update an expense
    pub fn upsert(&self, expense: Expense) -> Result<(), BudgetError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;
        let mut next_id = self.next_id.write().map_err(lock_error)?;
        *next_id = (*next_id).max(expense.id.next());

        if let Some(old) = data.get(&expense.id) {
            if let Some(ids) = by_category.get_mut(&old.category_id) {
                ids.retain(|&id| id != expense.id);
            }
        }

        by_category
            .entry(expense.category_id)
            .or_default()
            .push(expense.id);
        data.insert(expense.id, expense);
        Ok(())
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> Result<bool, BudgetError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_category = self.by_category.write().map_err(lock_error)?;

        match data.remove(&id) {
            Some(expense) => {
                if let Some(ids) = by_category.get_mut(&expense.category_id) {
                    ids.retain(|&eid| eid != id);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, BudgetError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        (temp_dir, repo)
    }

    fn add(repo: &ExpenseRepository, date: NaiveDateTime, category: i64, units: i64) -> Expense {
        repo.insert_with(|id| {
            Expense::new(id, date, CategoryId::new(category), Money::from_units(units), "")
        })
        .unwrap()
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let first = add(&repo, at(2018, 1, 10), 10, 10);
        let second = add(&repo, at(2018, 1, 11), 9, -10);

        assert_eq!(first.id, ExpenseId::new(1));
        assert_eq!(second.id, ExpenseId::new(2));
        assert_eq!(repo.get(second.id).unwrap().unwrap().amount.cents(), -1000);
    }

    #[test]
    fn test_deleted_ids_are_not_reused() {
        let (temp_dir, repo) = create_test_repo();
        add(&repo, at(2018, 1, 10), 10, 10);
        let second = add(&repo, at(2018, 1, 11), 9, -10);

        repo.delete(second.id).unwrap();
        assert_eq!(add(&repo, at(2018, 1, 12), 9, -5).id, ExpenseId::new(3));

        let third = ExpenseId::new(3);
        repo.delete(third).unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();
        assert_eq!(add(&repo2, at(2018, 1, 13), 9, -5).id, ExpenseId::new(4));
    }

    #[test]
    fn test_category_index_follows_updates() {
        let (_temp_dir, repo) = create_test_repo();
        let mut expense = add(&repo, at(2020, 1, 10), 9, -15);
        add(&repo, at(2020, 1, 11), 14, 45);

        assert_eq!(repo.count_by_category(CategoryId::new(9)).unwrap(), 1);

        expense.category_id = CategoryId::new(14);
        repo.upsert(expense.clone()).unwrap();

        assert_eq!(repo.count_by_category(CategoryId::new(9)).unwrap(), 0);
        assert_eq!(repo.get_by_category(CategoryId::new(14)).unwrap().len(), 2);

        repo.delete(expense.id).unwrap();
        assert_eq!(repo.count_by_category(CategoryId::new(14)).unwrap(), 1);
    }

    #[test]
    fn test_range_is_inclusive() {
        let (_temp_dir, repo) = create_test_repo();
        add(&repo, at(2025, 1, 10), 1, -1);
        add(&repo, at(2025, 1, 15), 1, -2);
        add(&repo, at(2025, 1, 20), 1, -3);

        let range = repo.get_in_range(at(2025, 1, 10), at(2025, 1, 15)).unwrap();
        assert_eq!(range.len(), 2);
        assert_eq!(range[1].amount.cents(), -200);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let expense = add(&repo, at(2019, 1, 10), 10, 15);
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();

        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get(expense.id).unwrap().unwrap(), expense);
        assert_eq!(repo2.count_by_category(CategoryId::new(10)).unwrap(), 1);
    }
}
