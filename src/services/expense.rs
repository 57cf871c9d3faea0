//! Expense service
//!
//! CRUD for expenses. Every write checks that the referenced category exists.

use chrono::NaiveDateTime;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryId, Expense, ExpenseId, Money};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Input for creating or replacing an expense
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub date: NaiveDateTime,
    pub category_id: CategoryId,
    pub amount: Money,
    pub description: String,
}

impl ExpenseInput {
    pub fn new(
        date: NaiveDateTime,
        category_id: CategoryId,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            date,
            category_id,
            amount,
            description: description.into(),
        }
    }
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense
    pub fn add(&self, input: ExpenseInput) -> BudgetResult<Expense> {
        self.ensure_category(input.category_id)?;

        let candidate = Expense::new(
            ExpenseId::new(0),
            input.date,
            input.category_id,
            input.amount,
            input.description.trim(),
        );
        candidate
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let expense = self
            .storage
            .expenses
            .insert_with(|id| Expense { id, ..candidate })?;
        self.storage.expenses.save()?;

        tracing::info!(
            id = %expense.id,
            category_id = %expense.category_id,
            amount = %expense.amount,
            "expense added"
        );
        Ok(expense)
    }

    /// Get an expense by ID, failing if it does not exist
    pub fn get(&self, id: ExpenseId) -> BudgetResult<Expense> {
        self.storage
            .expenses
            .get(id)?
            .ok_or_else(|| BudgetError::expense_not_found(id.to_string()))
    }

    /// List all expenses in store order
    pub fn list(&self) -> BudgetResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Replace the date, category, amount and description of an expense
    pub fn update(&self, id: ExpenseId, input: ExpenseInput) -> BudgetResult<Expense> {
        let mut expense = self.get(id)?;
        self.ensure_category(input.category_id)?;

        expense.update(
            input.date,
            input.category_id,
            input.amount,
            input.description.trim(),
        );
        expense
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        tracing::info!(id = %expense.id, "expense updated");
        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> BudgetResult<()> {
        if !self.storage.expenses.delete(id)? {
            return Err(BudgetError::expense_not_found(id.to_string()));
        }
        self.storage.expenses.save()?;

        tracing::info!(id = %id, "expense deleted");
        Ok(())
    }

    fn ensure_category(&self, category_id: CategoryId) -> BudgetResult<()> {
        match self.storage.categories.get(category_id)? {
            Some(_) => Ok(()),
            None => Err(BudgetError::invalid_category_reference(category_id)),
        }
    }
}
