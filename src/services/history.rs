//! History service
//!
//! Month-keyed snapshots of the live ledger. Saving a month overwrites any
//! earlier snapshot for it; loading a month replaces the live lines.

use chrono::Utc;
use tracing::info;

use crate::audit::EntityType;
use crate::error::{FincalcError, FincalcResult};
use crate::models::{Document, History, Snapshot, Summary};
use crate::storage::Storage;

use super::calculator;

/// Save a copy of the live ledger under `month`, replacing any earlier one
///
/// Returns the snapshot that was replaced, if any.
pub fn save_snapshot(doc: &mut Document, month: &str) -> FincalcResult<(Snapshot, Option<Snapshot>)> {
    let month = month.trim();
    if month.is_empty() {
        return Err(FincalcError::Validation("Month cannot be empty".into()));
    }

    let snapshot = Snapshot {
        created_at: Utc::now(),
        items: doc.items.clone(),
        expenses: doc.expenses.clone(),
        summary: calculator::snapshot_summary(&doc.items, &doc.expenses),
    };
    let replaced = doc.history.insert(month, snapshot.clone());
    Ok((snapshot, replaced))
}

/// Replace the live lines with a copy of the snapshot saved under `month`
pub fn load_snapshot(doc: &mut Document, month: &str) -> FincalcResult<Snapshot> {
    let snapshot = doc
        .history
        .get(month.trim())
        .cloned()
        .ok_or_else(|| FincalcError::month_not_found(month.trim()))?;

    doc.items = snapshot.items.clone();
    doc.expenses = snapshot.expenses.clone();
    Ok(snapshot)
}

/// Rewrite every stored month's summary from its lines
pub fn recompute_all_summaries(history: &mut History) {
    for snapshot in history.snapshots_mut() {
        snapshot.summary = calculator::snapshot_summary(&snapshot.items, &snapshot.expenses);
    }
}

/// Months with their recomputed summaries, newest month first
///
/// Lazy; clone the iterator to walk it again.
pub fn months(history: &History) -> impl Iterator<Item = (&str, Summary)> + Clone {
    history.newest_first().map(|(month, snapshot)| {
        (
            month.as_str(),
            calculator::snapshot_summary(&snapshot.items, &snapshot.expenses),
        )
    })
}

/// Service for monthly snapshots
pub struct HistoryService<'a> {
    storage: &'a Storage,
}

impl<'a> HistoryService<'a> {
    /// Create a new history service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Snapshot the live ledger for a month
    pub fn save_snapshot(&self, month: &str) -> FincalcResult<Snapshot> {
        let (snapshot, replaced) = self
            .storage
            .ledger
            .mutate(|doc| save_snapshot(doc, month))?;

        info!(month = month.trim(), overwritten = replaced.is_some(), "history snapshot saved");
        match replaced {
            Some(before) => self.storage.log_update(
                EntityType::HistorySnapshot,
                month.trim(),
                None,
                &before,
                &snapshot,
                Some("snapshot overwritten".into()),
            ),
            None => self.storage.log_create(
                EntityType::HistorySnapshot,
                month.trim(),
                None,
                &snapshot,
            ),
        }
        Ok(snapshot)
    }

    /// Replace the live ledger with a month's snapshot
    pub fn load_snapshot(&self, month: &str) -> FincalcResult<Snapshot> {
        let snapshot = self
            .storage
            .ledger
            .mutate(|doc| load_snapshot(doc, month))?;

        info!(month = month.trim(), "history snapshot loaded");
        self.storage.log_update(
            EntityType::Ledger,
            "ledger",
            None,
            &serde_json::Value::Null,
            &serde_json::json!({ "fromMonth": month.trim() }),
            Some(format!("ledger replaced by snapshot {}", month.trim())),
        );
        Ok(snapshot)
    }

    /// Rewrite every stored month's summary and save
    ///
    /// Returns the number of months rewritten.
    pub fn recompute_all_summaries(&self) -> FincalcResult<usize> {
        let count = self.storage.ledger.mutate(|doc| {
            recompute_all_summaries(&mut doc.history);
            Ok(doc.history.len())
        })?;

        info!(months = count, "history summaries recomputed");
        Ok(count)
    }

    /// Get one month's snapshot with its summary recomputed
    pub fn get(&self, month: &str) -> FincalcResult<Snapshot> {
        let mut snapshot = self
            .storage
            .ledger
            .read(|doc| doc.history.get(month.trim()).cloned())?
            .ok_or_else(|| FincalcError::month_not_found(month.trim()))?;
        snapshot.summary = calculator::snapshot_summary(&snapshot.items, &snapshot.expenses);
        Ok(snapshot)
    }

    /// All months and their summaries, newest first
    pub fn list_months(&self) -> FincalcResult<Vec<(String, Summary)>> {
        self.storage.ledger.read(|doc| {
            months(&doc.history)
                .map(|(month, summary)| (month.to_string(), summary))
                .collect()
        })
    }

    /// Delete one month's snapshot
    pub fn delete(&self, month: &str) -> FincalcResult<Snapshot> {
        let removed = self.storage.ledger.mutate(|doc| {
            doc.history
                .remove(month.trim())
                .ok_or_else(|| FincalcError::month_not_found(month.trim()))
        })?;

        self.storage
            .log_delete(EntityType::HistorySnapshot, month.trim(), None, &removed);
        Ok(removed)
    }
}
