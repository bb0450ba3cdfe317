//! Expense CLI commands
//!
//! Add, list, edit and remove the live expenses.

use clap::Subcommand;

use crate::display::{format_expense_list, format_totals};
use crate::error::{FincalcError, FincalcResult};
use crate::models::{Amount, Expense, ExpenseCategory};
use crate::services::{ExpensePatch, LedgerService};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Add an expense
    Add {
        /// Description
        #[arg(default_value = Expense::DEFAULT_DESCRIPTION)]
        description: String,
        /// Category (salaries, general, other)
        #[arg(short, long, default_value = "general")]
        category: String,
        /// Price, or day rate for salaries
        #[arg(short, long, default_value = "0")]
        price: String,
        /// Days worked (salaries only, default 30)
        #[arg(short, long)]
        days: Option<String>,
    },
    /// List expenses and totals
    List,
    /// Edit an expense
    Edit {
        /// Expense ID (or unique prefix)
        expense: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category (salaries, general, other)
        #[arg(short, long)]
        category: Option<String>,
        /// New price
        #[arg(short, long)]
        price: Option<String>,
        /// New day count
        #[arg(short, long)]
        days: Option<String>,
    },
    /// Remove an expense
    #[command(alias = "rm")]
    Remove {
        /// Expense ID (or unique prefix)
        expense: String,
    },
}

fn parse_category(raw: &str) -> FincalcResult<ExpenseCategory> {
    ExpenseCategory::parse(raw).ok_or_else(|| {
        let valid: Vec<String> = ExpenseCategory::all()
            .iter()
            .map(|c| c.to_string().to_lowercase())
            .collect();
        FincalcError::Validation(format!(
            "Invalid category: '{}'. Valid categories: {}",
            raw,
            valid.join(", ")
        ))
    })
}

/// Handle an expense command
pub fn handle_expense_command(storage: &Storage, cmd: ExpenseCommands) -> FincalcResult<()> {
    let service = LedgerService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            description,
            category,
            price,
            days,
        } => {
            let expense = Expense::new(
                description,
                parse_category(&category)?,
                Amount::parse_lenient(&price),
                days.as_deref().map(Amount::parse_lenient),
            );
            let expense = service.add_expense(expense)?;

            println!("Added expense: {}", expense);
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List => {
            print!("{}", format_expense_list(&service.expenses()?));
            println!();
            print!("{}", format_totals(&service.totals()?));
        }

        ExpenseCommands::Edit {
            expense,
            description,
            category,
            price,
            days,
        } => {
            let id = service.resolve_expense(&expense)?;
            let patch = ExpensePatch {
                description,
                category: category.as_deref().map(parse_category).transpose()?,
                price: price.as_deref().map(Amount::parse_lenient),
                days: days.as_deref().map(Amount::parse_lenient),
            };

            if patch.is_empty() {
                println!("No changes specified. Use --description, --category, --price or --days.");
                return Ok(());
            }

            let updated = service.update_expense(&id, patch)?;
            println!("Updated expense: {}", updated);
        }

        ExpenseCommands::Remove { expense } => {
            let id = service.resolve_expense(&expense)?;
            let removed = service.remove_expense(&id)?;
            println!("Removed expense: {}", removed.description);
        }
    }

    Ok(())
}
