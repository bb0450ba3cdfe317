//! Monthly history model
//!
//! History maps a caller-chosen month key (conventionally `YYYY-MM`) to a
//! snapshot of the ledger. Keys are kept sorted so listing newest-first is a
//! reverse walk of the map.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::btree_map;
use std::collections::BTreeMap;

use super::expense::Expense;
use super::item::Item;
use super::summary::Summary;

/// A month-keyed ledger snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// When the snapshot was taken
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Income lines at snapshot time
    #[serde(default)]
    pub items: Vec<Item>,

    /// Expenses at snapshot time
    #[serde(default)]
    pub expenses: Vec<Expense>,

    /// Cached totals
    #[serde(default)]
    pub summary: Summary,
}

/// All saved monthly snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct History(BTreeMap<String, Snapshot>);

impl History {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the snapshot stored for a month
    pub fn get(&self, month: &str) -> Option<&Snapshot> {
        self.0.get(month)
    }

    /// Store a snapshot, replacing any previous entry for the month
    pub fn insert(&mut self, month: impl Into<String>, snapshot: Snapshot) -> Option<Snapshot> {
        self.0.insert(month.into(), snapshot)
    }

    /// Remove a month's snapshot
    pub fn remove(&mut self, month: &str) -> Option<Snapshot> {
        self.0.remove(month)
    }

    /// Check whether a month has a snapshot
    pub fn contains(&self, month: &str) -> bool {
        self.0.contains_key(month)
    }

    /// Number of stored months
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no months are stored
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mutable access to every snapshot
    pub fn snapshots_mut(&mut self) -> btree_map::ValuesMut<'_, String, Snapshot> {
        self.0.values_mut()
    }

    /// Months and snapshots, newest month first
    ///
    /// The iterator is lazy and `Clone`, so a caller can restart the walk by
    /// cloning it before consuming.
    pub fn newest_first(&self) -> std::iter::Rev<btree_map::Iter<'_, String, Snapshot>> {
        self.0.iter().rev()
    }
}

impl FromIterator<(String, Snapshot)> for History {
    fn from_iter<T: IntoIterator<Item = (String, Snapshot)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
