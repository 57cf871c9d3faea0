//! Storage layer for HomeBudget
//!
//! The category and expense stores, persisted as JSON files with atomic
//! writes. [`Storage`] is the handle every service and report works through;
//! there is no process-wide connection.

pub mod categories;
pub mod expenses;
pub mod file_io;
pub mod init;

pub use categories::CategoryRepository;
pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, DEFAULT_CATEGORIES};

use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;

/// Open handle over both stores
///
/// Acquired with [`Storage::open`], which loads everything from disk, and
/// released with [`Storage::close`], which flushes everything back.
pub struct Storage {
    paths: BudgetPaths,
    pub categories: CategoryRepository,
    pub expenses: ExpenseRepository,
}

impl Storage {
    /// Create an empty, unloaded storage handle
    pub fn new(paths: BudgetPaths) -> Result<Self, BudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            categories: CategoryRepository::new(paths.categories_file()),
            expenses: ExpenseRepository::new(paths.expenses_file()),
            paths,
        })
    }

    /// Open the stores under `paths`, loading all data
    pub fn open(paths: BudgetPaths) -> Result<Self, BudgetError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        tracing::debug!(
            data_dir = %storage.paths.data_dir().display(),
            "storage opened"
        );
        Ok(storage)
    }

    /// Flush all data and release the handle
    pub fn close(self) -> Result<(), BudgetError> {
        self.save_all()?;
        tracing::debug!("storage closed");
        Ok(())
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), BudgetError> {
        self.categories.load()?;
        self.expenses.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BudgetError> {
        self.categories.save()?;
        self.expenses.save()?;
        Ok(())
    }
}
