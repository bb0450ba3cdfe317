//! Settings CLI commands

use clap::Subcommand;

use crate::error::FincalcResult;
use crate::models::Amount;
use crate::services::LedgerService;
use crate::storage::Storage;

/// Settings subcommands
#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show current settings
    Show,
    /// Set the exchange rate (ARS per USD)
    Rate {
        /// Rate, e.g. 350 or 350,5
        rate: String,
    },
    /// Show totals in USD as well
    UsdOn,
    /// Show totals in ARS only
    UsdOff,
}

/// Handle a settings command
pub fn handle_settings_command(storage: &Storage, cmd: SettingsCommands) -> FincalcResult<()> {
    let service = LedgerService::new(storage);

    let settings = match cmd {
        SettingsCommands::Show => service.settings()?,
        SettingsCommands::Rate { rate } => service.set_exchange_rate(Amount::parse_lenient(&rate))?,
        SettingsCommands::UsdOn => service.set_show_usd(true)?,
        SettingsCommands::UsdOff => service.set_show_usd(false)?,
    };

    println!("Exchange rate: {} ARS/USD", settings.exchange_rate);
    println!("Show USD:      {}", if settings.show_usd { "yes" } else { "no" });
    Ok(())
}
