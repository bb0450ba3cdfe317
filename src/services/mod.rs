//! Service layer for fincalc
//!
//! Each module exposes plain operations over `&mut Document` plus a service
//! struct that runs them through [`crate::storage::Storage`], so every change
//! is validated, saved and audited in one place.

pub mod archive;
pub mod calculator;
pub mod history;
pub mod import;
pub mod ledger;

pub use archive::{ArchiveService, FolderSummary};
pub use calculator::LedgerTotals;
pub use history::HistoryService;
pub use import::{ImportDocument, ImportMode, ImportResult, ImportService};
pub use ledger::{ExpensePatch, ItemPatch, LedgerService};

/// Pick the ID matching `identifier` exactly, or the only ID it is a prefix of
pub(crate) fn match_id<'a>(
    ids: impl Iterator<Item = &'a str> + Clone,
    identifier: &str,
) -> Option<&'a str> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return None;
    }
    if let Some(exact) = ids.clone().find(|id| *id == identifier) {
        return Some(exact);
    }

    let mut prefixed = ids.filter(|id| id.starts_with(identifier));
    match (prefixed.next(), prefixed.next()) {
        (Some(only), None) => Some(only),
        _ => None,
    }
}
