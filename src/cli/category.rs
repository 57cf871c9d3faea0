//! Category CLI commands

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::{BudgetError, BudgetResult};
use crate::models::CategoryType;
use crate::services::CategoryService;
use crate::storage::Storage;

use super::resolve_category;

/// Category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// List all categories in store order
    List,

    /// Create a new category
    Add {
        /// Category description
        description: String,
        /// Category type (income, expense, credit, savings)
        #[arg(short = 't', long = "type", default_value = "expense")]
        category_type: String,
    },

    /// Show category details
    Show {
        /// Category name or ID
        category: String,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New type
        #[arg(short = 't', long = "type")]
        category_type: Option<String>,
    },

    /// Delete a category with no expenses
    Delete {
        /// Category name or ID
        category: String,
    },
}

fn parse_type(input: &str) -> BudgetResult<CategoryType> {
    input
        .parse::<CategoryType>()
        .map_err(|e| BudgetError::Validation(e.to_string()))
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> BudgetResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            let categories = service.list()?;
            print!("{}", format_category_list(&categories));
        }

        CategoryCommands::Add {
            description,
            category_type,
        } => {
            let category = service.add(&description, parse_type(&category_type)?)?;
            println!("Created category: {}", category.description);
            println!("  Type: {}", category.category_type);
            println!("  ID: {}", category.id);
        }

        CategoryCommands::Show { category } => {
            let cat = resolve_category(storage, &category)?;
            let expense_count = storage.expenses.count_by_category(cat.id)?;
            print!("{}", format_category_details(&cat, expense_count));
        }

        CategoryCommands::Edit {
            category,
            description,
            category_type,
        } => {
            let cat = resolve_category(storage, &category)?;

            if description.is_none() && category_type.is_none() {
                println!("No changes specified. Use --description or --type.");
                return Ok(());
            }

            let new_type = category_type.as_deref().map(parse_type).transpose()?;
            let updated = service.update(cat.id, description.as_deref(), new_type)?;
            println!("Updated category: {}", updated.description);
        }

        CategoryCommands::Delete { category } => {
            let cat = resolve_category(storage, &category)?;
            service.delete(cat.id)?;
            println!("Deleted category: {}", cat.description);
        }
    }

    Ok(())
}
