//! History CLI commands

use clap::Subcommand;

use crate::display::{format_expense_list, format_item_list, format_month_list, format_totals};
use crate::error::FincalcResult;
use crate::services::calculator::LedgerTotals;
use crate::services::HistoryService;
use crate::storage::Storage;

/// History subcommands
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Save the live ledger as a month's snapshot (overwrites)
    Save {
        /// Month key, e.g. 2024-05
        month: String,
    },
    /// Replace the live ledger with a month's snapshot
    Load {
        /// Month key
        month: String,
    },
    /// List saved months, newest first
    List,
    /// Show one month's snapshot
    Show {
        /// Month key
        month: String,
    },
    /// Delete a month's snapshot
    Delete {
        /// Month key
        month: String,
    },
    /// Rewrite every month's stored totals from its lines
    Recompute,
}

/// Handle a history command
pub fn handle_history_command(storage: &Storage, cmd: HistoryCommands) -> FincalcResult<()> {
    let service = HistoryService::new(storage);

    match cmd {
        HistoryCommands::Save { month } => {
            let snapshot = service.save_snapshot(&month)?;
            println!(
                "Saved snapshot {}: {} items, {} expenses",
                month.trim(),
                snapshot.items.len(),
                snapshot.expenses.len()
            );
        }

        HistoryCommands::Load { month } => {
            let snapshot = service.load_snapshot(&month)?;
            println!(
                "Loaded snapshot {}: {} items, {} expenses",
                month.trim(),
                snapshot.items.len(),
                snapshot.expenses.len()
            );
        }

        HistoryCommands::List => {
            print!("{}", format_month_list(&service.list_months()?));
        }

        HistoryCommands::Show { month } => {
            let snapshot = service.get(&month)?;
            println!(
                "Snapshot {} (saved {})",
                month.trim(),
                snapshot.created_at.format("%Y-%m-%d %H:%M")
            );
            println!();
            print!("{}", format_item_list(&snapshot.items));
            println!();
            print!("{}", format_expense_list(&snapshot.expenses));
            println!();
            print!(
                "{}",
                format_totals(&LedgerTotals {
                    summary: snapshot.summary,
                    usd: None,
                })
            );
        }

        HistoryCommands::Delete { month } => {
            service.delete(&month)?;
            println!("Deleted snapshot {}", month.trim());
        }

        HistoryCommands::Recompute => {
            let count = service.recompute_all_summaries()?;
            println!("Recomputed summaries for {} months", count);
        }
    }

    Ok(())
}
