//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json. Records are kept
//! in id order, which is the order `get_all` hands them out in.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::BudgetError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CategoryData {
    pub categories: Vec<Category>,
    /// Id the next insert receives; never moves backwards
    #[serde(default)]
    pub next_id: CategoryId,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    categories: RwLock<BTreeMap<CategoryId, Category>>,
    next_id: RwLock<CategoryId>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            categories: RwLock::new(BTreeMap::new()),
            next_id: RwLock::new(CategoryId::new(1)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<CategoryId, Category>>, BudgetError> {
        self.categories
            .read()
            .map_err(|e| BudgetError::StorageUnavailable(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<CategoryId, Category>>, BudgetError> {
        self.categories
            .write()
            .map_err(|e| BudgetError::StorageUnavailable(format!("Failed to acquire write lock: {}", e)))
    }

    fn next_id(&self) -> Result<RwLockWriteGuard<'_, CategoryId>, BudgetError> {
        self.next_id
            .write()
            .map_err(|e| BudgetError::StorageUnavailable(format!("Failed to acquire id lock: {}", e)))
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), BudgetError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut categories = self.write()?;
        let mut next_id = self.next_id()?;
        categories.clear();
        for category in file_data.categories {
            categories.insert(category.id, category);
        }
        *next_id = categories
            .keys()
            .next_back()
            .map(CategoryId::next)
            .into_iter()
            .chain([file_data.next_id, CategoryId::new(1)])
            .max()
            .unwrap_or(CategoryId::new(1));

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), BudgetError> {
        let categories = self.read()?;
        let file_data = CategoryData {
            categories: categories.values().cloned().collect(),
            next_id: *self.next_id()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a category by ID
    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, BudgetError> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// Get all categories in id order
    pub fn get_all(&self) -> Result<Vec<Category>, BudgetError> {
        Ok(self.read()?.values().cloned().collect())
    }

    /// Get a category by description (case-insensitive)
    pub fn get_by_description(&self, description: &str) -> Result<Option<Category>, BudgetError> {
        let wanted = description.trim().to_lowercase();
        Ok(self
            .read()?
            .values()
            .find(|c| c.description.to_lowercase() == wanted)
            .cloned())
    }

    /// Insert a new category under a fresh id
    ///
    /// `build` receives the assigned id; the id is reserved under the same
    /// write lock that stores the result. Ids of deleted categories are not
    /// handed out again.
    pub fn insert_with<F>(&self, build: F) -> Result<Category, BudgetError>
    where
        F: FnOnce(CategoryId) -> Category,
    {
        let mut categories = self.write()?;
        let mut next_id = self.next_id()?;
        let category = build(*next_id);
        *next_id = (*next_id).max(category.id.next());
        categories.insert(category.id, category.clone());
        Ok(category)
    }

    /// Insert or update a category
    pub fn upsert(&self, category: Category) -> Result<(), BudgetError> {
        let mut categories = self.write()?;
        let mut next_id = self.next_id()?;
        *next_id = (*next_id).max(category.id.next());
        categories.insert(category.id, category);
        Ok(())
    }

    /// Delete a category
    pub fn delete(&self, id: CategoryId) -> Result<bool, BudgetError> {
        Ok(self.write()?.remove(&id).is_some())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, BudgetError> {
        Ok(self.read()?.len())
    }
}
