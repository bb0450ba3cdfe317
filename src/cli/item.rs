//! Item CLI commands
//!
//! Add, list, edit and remove the live income lines.

use clap::Subcommand;

use crate::display::{format_item_list, format_totals};
use crate::error::{FincalcError, FincalcResult};
use crate::models::{Amount, Item, Measure};
use crate::services::{ItemPatch, LedgerService};
use crate::storage::Storage;

/// Item subcommands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add an income line
    Add {
        /// Description
        #[arg(default_value = Item::DEFAULT_DESCRIPTION)]
        description: String,
        /// Price per unit (or per meter)
        #[arg(short, long, default_value = "0")]
        price: String,
        /// Quantity
        #[arg(short, long, default_value = "1")]
        quantity: String,
        /// Measure (unit, meter)
        #[arg(short, long, default_value = "unit")]
        measure: String,
    },
    /// List income lines and totals
    List,
    /// Edit an income line
    Edit {
        /// Item ID (or unique prefix)
        item: String,
        /// New description
        #[arg(short, long)]
        description: Option<String>,
        /// New price per unit
        #[arg(short, long)]
        price: Option<String>,
        /// New quantity
        #[arg(short, long)]
        quantity: Option<String>,
        /// New measure (unit, meter)
        #[arg(short, long)]
        measure: Option<String>,
    },
    /// Remove an income line
    #[command(alias = "rm")]
    Remove {
        /// Item ID (or unique prefix)
        item: String,
    },
}

fn parse_measure(raw: &str) -> FincalcResult<Measure> {
    Measure::parse(raw).ok_or_else(|| {
        FincalcError::Validation(format!(
            "Invalid measure: '{}'. Valid measures: unit, meter",
            raw
        ))
    })
}

/// Handle an item command
pub fn handle_item_command(storage: &Storage, cmd: ItemCommands) -> FincalcResult<()> {
    let service = LedgerService::new(storage);

    match cmd {
        ItemCommands::Add {
            description,
            price,
            quantity,
            measure,
        } => {
            let item = Item::new(
                description,
                Amount::parse_lenient(&price),
                Amount::parse_lenient(&quantity),
                parse_measure(&measure)?,
            );
            let item = service.add_item(item)?;

            println!("Added item: {}", item);
            println!("  ID: {}", item.id);
        }

        ItemCommands::List => {
            print!("{}", format_item_list(&service.items()?));
            println!();
            print!("{}", format_totals(&service.totals()?));
        }

        ItemCommands::Edit {
            item,
            description,
            price,
            quantity,
            measure,
        } => {
            let id = service.resolve_item(&item)?;
            let patch = ItemPatch {
                description,
                price_per_unit: price.as_deref().map(Amount::parse_lenient),
                quantity: quantity.as_deref().map(Amount::parse_lenient),
                measure: measure.as_deref().map(parse_measure).transpose()?,
            };

            if patch.is_empty() {
                println!("No changes specified. Use --description, --price, --quantity or --measure.");
                return Ok(());
            }

            let updated = service.update_item(&id, patch)?;
            println!("Updated item: {}", updated);
        }

        ItemCommands::Remove { item } => {
            let id = service.resolve_item(&item)?;
            let removed = service.remove_item(&id)?;
            println!("Removed item: {}", removed.description);
        }
    }

    Ok(())
}
