//! Category model
//!
//! Categories classify expenses. Each one has a type that says what kind of
//! money flows through it (income, spending, credit, savings).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::CategoryId;

/// Maximum length of a category description
pub const MAX_DESCRIPTION_LEN: usize = 50;

/// The kind of money flow a category tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Income,
    #[default]
    Expense,
    Credit,
    Savings,
}

impl CategoryType {
    /// All category types in declaration order
    pub fn all() -> &'static [Self] {
        &[Self::Income, Self::Expense, Self::Credit, Self::Savings]
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
            Self::Credit => "Credit",
            Self::Savings => "Savings",
        };
        f.pad(name)
    }
}

impl FromStr for CategoryType {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" | "expenses" => Ok(Self::Expense),
            "credit" => Ok(Self::Credit),
            "savings" | "saving" => Ok(Self::Savings),
            other => Err(CategoryValidationError::UnknownType(other.to_string())),
        }
    }
}

/// A user-defined expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identifier, never changes
    pub id: CategoryId,

    /// Display name, used as the grouping key in reports
    pub description: String,

    #[serde(rename = "type", default)]
    pub category_type: CategoryType,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new category
    pub fn new(id: CategoryId, description: impl Into<String>, category_type: CategoryType) -> Self {
        let now = Utc::now();
        Self {
            id,
            description: description.into(),
            category_type,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rename the category
    pub fn rename(&mut self, description: impl Into<String>) {
        self.description = description.into();
        self.updated_at = Utc::now();
    }

    /// Change the category type
    pub fn set_type(&mut self, category_type: CategoryType) {
        self.category_type = category_type;
        self.updated_at = Utc::now();
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.description.trim().is_empty() {
            return Err(CategoryValidationError::EmptyDescription);
        }

        let len = self.description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(CategoryValidationError::DescriptionTooLong(len));
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyDescription,
    DescriptionTooLong(usize),
    UnknownType(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Category description cannot be empty"),
            Self::DescriptionTooLong(len) => write!(
                f,
                "Category description too long ({} chars, max {})",
                len, MAX_DESCRIPTION_LEN
            ),
            Self::UnknownType(s) => write!(
                f,
                "Unknown category type '{}' (expected income, expense, credit or savings)",
                s
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new(CategoryId::new(9), "Credit Card", CategoryType::Credit);
        assert_eq!(category.id.get(), 9);
        assert_eq!(category.description, "Credit Card");
        assert_eq!(category.category_type, CategoryType::Credit);
        assert_eq!(category.to_string(), "Credit Card");
    }

    #[test]
    fn test_category_validation() {
        let mut category = Category::new(CategoryId::new(1), "Rent", CategoryType::Expense);
        assert!(category.validate().is_ok());

        category.rename("   ");
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::EmptyDescription)
        );

        category.rename("x".repeat(51));
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::DescriptionTooLong(51))
        );
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!("Income".parse::<CategoryType>().unwrap(), CategoryType::Income);
        assert_eq!(" SAVINGS ".parse::<CategoryType>().unwrap(), CategoryType::Savings);
        assert_eq!("credit".parse::<CategoryType>().unwrap(), CategoryType::Credit);
        assert!(matches!(
            "loan".parse::<CategoryType>(),
            Err(CategoryValidationError::UnknownType(_))
        ));
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let category = Category::new(CategoryId::new(16), "Income", CategoryType::Income);
        let json = serde_json::to_value(&category).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["id"], 16);

        let back: Category = serde_json::from_value(json).unwrap();
        assert_eq!(back, category);
    }
}
