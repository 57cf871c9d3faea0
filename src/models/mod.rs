//! Core data models for HomeBudget
//!
//! The stored records (categories and expenses) plus the id and money types
//! they are built from. Report shapes live in `reports`.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{Category, CategoryType};
pub use expense::Expense;
pub use ids::{CategoryId, ExpenseId};
pub use money::{Money, MoneyParseError};
