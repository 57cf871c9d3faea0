//! Expense CLI commands

use std::collections::HashMap;

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::expense::{format_expense_details, format_expense_list};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{ExpenseId, Money};
use crate::services::{ExpenseInput, ExpenseService};
use crate::storage::Storage;

use super::{parse_date_time, resolve_category_reference};

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// List expenses in store order
    List {
        /// Only expenses in this category (name or ID)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Record an expense
    Add {
        /// Category name or ID
        category: String,
        /// Amount (e.g., "45", "-10.50"); negative for credits
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Expense date (YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS]); defaults to now
        #[arg(short, long)]
        date: Option<String>,
        /// Short description
        #[arg(short = 'm', long, default_value = "")]
        description: String,
    },

    /// Show expense details
    Show {
        /// Expense ID
        id: ExpenseId,
    },

    /// Edit an expense; unspecified fields are kept
    Edit {
        /// Expense ID
        id: ExpenseId,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID
        id: ExpenseId,
    },
}

fn parse_amount(input: &str) -> BudgetResult<Money> {
    Money::parse(input).map_err(|e| BudgetError::Validation(e.to_string()))
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> BudgetResult<()> {
    let service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::List { category } => {
            let expenses = match category {
                Some(identifier) => {
                    let cat = resolve_category_reference(storage, &identifier)?;
                    storage.expenses.get_by_category(cat.id)?
                }
                None => service.list()?,
            };
            let names: HashMap<_, _> = storage
                .categories
                .get_all()?
                .into_iter()
                .map(|c| (c.id, c.description))
                .collect();
            print!(
                "{}",
                format_expense_list(&expenses, &names, &settings.date_format)
            );
        }

        ExpenseCommands::Add {
            category,
            amount,
            date,
            description,
        } => {
            let cat = resolve_category_reference(storage, &category)?;
            let date = match date {
                Some(d) => parse_date_time(&d)?,
                None => chrono::Local::now().naive_local(),
            };
            let expense = service.add(ExpenseInput::new(
                date,
                cat.id,
                parse_amount(&amount)?,
                description,
            ))?;
            println!(
                "Added expense {}: {} to {}",
                expense.id,
                expense.amount.format_with_symbol(&settings.currency_symbol),
                cat.description
            );
        }

        ExpenseCommands::Show { id } => {
            let expense = service.get(id)?;
            let category = storage.categories.get(expense.category_id)?;
            print!(
                "{}",
                format_expense_details(&expense, category.as_ref().map(|c| c.description.as_str()))
            );
        }

        ExpenseCommands::Edit {
            id,
            category,
            amount,
            date,
            description,
        } => {
            let current = service.get(id)?;
            let category_id = match category {
                Some(identifier) => resolve_category_reference(storage, &identifier)?.id,
                None => current.category_id,
            };
            let input = ExpenseInput::new(
                date.as_deref()
                    .map(parse_date_time)
                    .transpose()?
                    .unwrap_or(current.date),
                category_id,
                amount
                    .as_deref()
                    .map(parse_amount)
                    .transpose()?
                    .unwrap_or(current.amount),
                description.unwrap_or(current.description),
            );
            let updated = service.update(id, input)?;
            println!("Updated expense {}", updated.id);
        }

        ExpenseCommands::Delete { id } => {
            service.delete(id)?;
            println!("Deleted expense {}", id);
        }
    }

    Ok(())
}
