//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod expense;
pub mod export;
pub mod folder;
pub mod history;
pub mod import;
pub mod item;
pub mod settings;

pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportArgs, ExportFormat};
pub use folder::{handle_folder_command, handle_job_command, FolderCommands, JobCommands};
pub use history::{handle_history_command, HistoryCommands};
pub use import::{handle_import_command, ImportArgs};
pub use item::{handle_item_command, ItemCommands};
pub use settings::{handle_settings_command, SettingsCommands};
