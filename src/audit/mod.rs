//! Audit logging system for fincalc
//!
//! Records every create, update and delete of ledger entities, and every
//! import, in an append-only JSONL log next to the ledger file.
//!
//! - `AuditEntry`: one operation on one entity, with before/after values.
//! - `AuditLogger`: appends entries to the log and reads them back.
//! - `generate_diff`: human-readable summary of an edit.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
