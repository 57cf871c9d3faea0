//! Expense model
//!
//! An expense is a single dated amount booked against one category. Positive
//! and negative amounts are both allowed; the sign convention belongs to the
//! category (a credit card payment is negative, income is positive).

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// Maximum length of an expense description
pub const MAX_DESCRIPTION_LEN: usize = 200;

/// Largest accepted magnitude of a single amount, in cents
///
/// Keeps running balances and subtotals over the store inside `i64`.
pub const MAX_AMOUNT_CENTS: i64 = 10_000_000_000_000;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Store-assigned identifier
    pub id: ExpenseId,

    /// Category this expense is booked against
    pub category_id: CategoryId,

    /// Signed amount
    pub amount: Money,

    #[serde(default)]
    pub description: String,

    /// When the expense happened
    pub date: NaiveDateTime,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        id: ExpenseId,
        date: NaiveDateTime,
        category_id: CategoryId,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            category_id,
            amount,
            description: description.into(),
            date,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field at once
    pub fn update(
        &mut self,
        date: NaiveDateTime,
        category_id: CategoryId,
        amount: Money,
        description: impl Into<String>,
    ) {
        self.date = date;
        self.category_id = category_id;
        self.amount = amount;
        self.description = description.into();
        self.updated_at = Utc::now();
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        let len = self.description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(ExpenseValidationError::DescriptionTooLong(len));
        }
        if self.amount.cents().unsigned_abs() > MAX_AMOUNT_CENTS.unsigned_abs() {
            return Err(ExpenseValidationError::AmountOutOfRange(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.amount,
            self.description
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    DescriptionTooLong(usize),
    AmountOutOfRange(Money),
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DescriptionTooLong(len) => write!(
                f,
                "Expense description too long ({} chars, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
            Self::AmountOutOfRange(amount) => write!(
                f,
                "Expense amount {} out of range (max {})",
                amount,
                Money::from_cents(MAX_AMOUNT_CENTS)
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
