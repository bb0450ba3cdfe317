//! Export module for fincalc
//!
//! - JSON: the whole document in its persisted shape (re-importable)
//! - YAML: the same document, human-readable (re-importable)
//! - CSV: the live ledger lines with totals (spreadsheet-compatible)

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_ledger_csv, write_ledger_csv};
pub use json::{export_full_json, write_document_json};
pub use yaml::{export_full_yaml, import_from_yaml};
