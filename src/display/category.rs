//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    description: String,
    #[tabled(rename = "Type")]
    category_type: String,
}

/// Format categories as a table in store order
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'homebudget init' to create default categories."
            .to_string();
    }

    let rows = categories.iter().map(|c| CategoryRow {
        id: c.id.to_string(),
        description: c.description.clone(),
        category_type: c.category_type.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format category details
pub fn format_category_details(category: &Category, expense_count: usize) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.description));
    output.push_str(&format!("  ID:       {}\n", category.id));
    output.push_str(&format!("  Type:     {}\n", category.category_type));
    output.push_str(&format!("  Expenses: {}\n", expense_count));

    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        category.created_at.format("%Y-%m-%d %H:%M UTC")
    ));
    output.push_str(&format!(
        "  Modified: {}\n",
        category.updated_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType};

    #[test]
    fn test_format_empty_list() {
        let output = format_category_list(&[]);
        assert!(output.contains("No categories found"));
    }

    #[test]
    fn test_format_category_list() {
        let categories = vec![
            Category::new(CategoryId::new(9), "Credit Card", CategoryType::Credit),
            Category::new(CategoryId::new(10), "Clothes", CategoryType::Expense),
        ];

        let output = format_category_list(&categories);
        assert!(output.contains("Credit Card"));
        assert!(output.contains("Expense"));
        assert!(output.find("Credit Card").unwrap() < output.find("Clothes").unwrap());
    }

    #[test]
    fn test_format_details() {
        let category = Category::new(CategoryId::new(14), "Eating Out", CategoryType::Expense);
        let output = format_category_details(&category, 2);

        assert!(output.starts_with("Category: Eating Out"));
        assert!(output.contains("ID:       14"));
        assert!(output.contains("Expenses: 2"));
    }
}
