//! Service layer for HomeBudget
//!
//! Validation and referential rules on top of the raw stores.

pub mod category;
pub mod expense;

pub use category::CategoryService;
pub use expense::{ExpenseInput, ExpenseService};
