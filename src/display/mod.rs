//! Display formatting for terminal output
//!
//! Tables for the live ledger, folders and history, plus the currency
//! formatter they share.

pub mod currency;
pub mod folder;
pub mod history;
pub mod ledger;

pub use currency::{format_amount, Currency, Formatter, LocaleFormatter};
pub use folder::{format_folder_details, format_folder_list};
pub use history::format_month_list;
pub use ledger::{format_expense_list, format_item_list, format_totals};
