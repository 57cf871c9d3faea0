//! Display formatting for terminal output
//!
//! Tables for categories, expenses and the four report shapes.

pub mod category;
pub mod expense;
pub mod report;

pub use category::{format_category_details, format_category_list};
pub use expense::{format_expense_details, format_expense_list};
pub use report::{
    format_budget_items, format_budget_items_by_category, format_budget_items_by_month,
    format_category_month,
};
