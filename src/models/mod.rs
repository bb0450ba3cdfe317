//! Core data models for fincalc
//!
//! This module contains the data structures of the ledger domain: income
//! items, expenses, archive folders and jobs, monthly history and the
//! document that holds them all.

pub mod amount;
pub mod document;
pub mod expense;
pub mod folder;
pub mod history;
pub mod ids;
pub mod item;
pub mod summary;

pub use amount::Amount;
pub use document::Document;
pub use expense::{BillingRule, Expense, ExpenseCategory};
pub use folder::{Folder, FolderValidationError, Job};
pub use history::{History, Snapshot};
pub use ids::{ExpenseId, FolderId, ItemId, JobId};
pub use item::{Item, Measure};
pub use summary::Summary;
