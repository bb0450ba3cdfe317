//! fincalc - a small-business ledger for the terminal
//!
//! Tracks income lines and expenses, derives running totals, and archives
//! the working ledger either as named jobs inside folders or as month-keyed
//! history snapshots. The whole dataset can be exported and imported back,
//! replacing or merging into the stored data.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution, ledger settings and logging setup
//! - `error`: Custom error types
//! - `models`: Core data models (items, expenses, folders, jobs, history)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer (calculator, ledger, archive, history, import)
//! - `audit`: Audit logging system
//! - `export`: JSON, YAML and CSV export
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fincalc::config::FincalcPaths;
//! use fincalc::services::LedgerService;
//! use fincalc::storage::Storage;
//!
//! let storage = Storage::open(FincalcPaths::new()?)?;
//! let totals = LedgerService::new(&storage).totals()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{FincalcError, FincalcResult};
