//! Storage initialization
//!
//! Handles first-run setup and the default category set

use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::models::{Category, CategoryId, CategoryType};

use super::categories::CategoryData;
use super::file_io::write_json_atomic;

/// Categories created for a fresh budget, in id order starting at 1
pub const DEFAULT_CATEGORIES: &[(&str, CategoryType)] = &[
    ("Utilities", CategoryType::Expense),
    ("Rent", CategoryType::Expense),
    ("Food", CategoryType::Expense),
    ("Entertainment", CategoryType::Expense),
    ("Education", CategoryType::Expense),
    ("Miscellaneous", CategoryType::Expense),
    ("Medical Expenses", CategoryType::Expense),
    ("Vacation", CategoryType::Expense),
    ("Credit Card", CategoryType::Credit),
    ("Clothes", CategoryType::Expense),
    ("Gifts", CategoryType::Expense),
    ("Insurance", CategoryType::Expense),
    ("Transportation", CategoryType::Expense),
    ("Eating Out", CategoryType::Expense),
    ("Savings", CategoryType::Savings),
    ("Income", CategoryType::Income),
];

/// The default categories with their assigned ids
pub fn default_categories() -> Vec<Category> {
    DEFAULT_CATEGORIES
        .iter()
        .zip(1..)
        .map(|(&(description, category_type), id)| {
            Category::new(CategoryId::new(id), description, category_type)
        })
        .collect()
}

/// Initialize storage for a fresh installation
///
/// Existing category files are left alone.
pub fn initialize_storage(paths: &BudgetPaths) -> Result<bool, BudgetError> {
    paths.ensure_directories()?;

    if paths.categories_file().exists() {
        return Ok(false);
    }

    let data = CategoryData {
        categories: default_categories(),
        ..CategoryData::default()
    };
    write_json_atomic(paths.categories_file(), &data)?;
    tracing::info!(
        count = data.categories.len(),
        path = %paths.categories_file().display(),
        "created default categories"
    );

    Ok(true)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &BudgetPaths) -> bool {
    !paths.is_initialized()
}
