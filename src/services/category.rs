//! Category service
//!
//! CRUD for categories, with duplicate-name checks and the referential rule
//! that a category in use by any expense cannot be deleted.

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryId, CategoryType};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn add(&self, description: &str, category_type: CategoryType) -> BudgetResult<Category> {
        let description = description.trim();
        self.ensure_unique(description, None)?;

        let candidate = Category::new(CategoryId::new(0), description, category_type);
        candidate
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let category = self
            .storage
            .categories
            .insert_with(|id| Category { id, ..candidate })?;
        self.storage.categories.save()?;

        tracing::info!(id = %category.id, description = %category.description, "category added");
        Ok(category)
    }

    /// Get a category by ID, failing if it does not exist
    pub fn get(&self, id: CategoryId) -> BudgetResult<Category> {
        self.storage
            .categories
            .get(id)?
            .ok_or_else(|| BudgetError::category_not_found(id.to_string()))
    }

    /// Find a category by description or ID string
    ///
    /// A `cat-` prefixed id always means that id. Otherwise a description
    /// match wins over a bare numeric id, so a category named "9" shadows id
    /// 9 unless it is written `cat-9`.
    pub fn find(&self, identifier: &str) -> BudgetResult<Option<Category>> {
        if identifier.trim().starts_with("cat-") {
            return match identifier.parse::<CategoryId>() {
                Ok(id) => self.storage.categories.get(id),
                Err(_) => Ok(None),
            };
        }

        if let Some(category) = self.storage.categories.get_by_description(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        Ok(None)
    }

    /// List all categories in store order
    pub fn list(&self) -> BudgetResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Update a category's description and/or type
    pub fn update(
        &self,
        id: CategoryId,
        description: Option<&str>,
        category_type: Option<CategoryType>,
    ) -> BudgetResult<Category> {
        let mut category = self.get(id)?;

        if let Some(new_description) = description {
            let new_description = new_description.trim();
            self.ensure_unique(new_description, Some(id))?;
            category.rename(new_description);
        }

        if let Some(new_type) = category_type {
            category.set_type(new_type);
        }

        category
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(id = %category.id, description = %category.description, "category updated");
        Ok(category)
    }

    /// Delete a category
    ///
    /// Fails with [`BudgetError::CategoryInUse`] while expenses reference it.
    pub fn delete(&self, id: CategoryId) -> BudgetResult<()> {
        let category = self.get(id)?;

        let expense_count = self.storage.expenses.count_by_category(id)?;
        if expense_count > 0 {
            return Err(BudgetError::CategoryInUse {
                category: category.description,
                expense_count,
            });
        }

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        tracing::info!(id = %id, description = %category.description, "category deleted");
        Ok(())
    }

    fn ensure_unique(&self, description: &str, except: Option<CategoryId>) -> BudgetResult<()> {
        match self.storage.categories.get_by_description(description)? {
            Some(existing) if Some(existing.id) != except => Err(BudgetError::Duplicate {
                entity_type: "Category",
                identifier: description.to_string(),
            }),
            _ => Ok(()),
        }
    }
}
