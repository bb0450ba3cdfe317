//! Document import service
//!
//! Brings in a previously exported document, either replacing the stored
//! data wholesale or merging the incoming lines and folders into it. The
//! incoming text is fully decoded and validated before anything is touched;
//! a document without `items`/`expenses` is reported as an unexpected
//! structure and only applied once the caller confirms.

use serde::Deserialize;
use tracing::{info, warn};

use crate::config::Settings;
use crate::error::{FincalcError, FincalcResult};
use crate::models::{Document, Expense, Folder, History, Item};
use crate::storage::Storage;

use super::history;

/// How an import is applied to the stored document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Substitute items, expenses, folders and history; settings if present
    #[default]
    Replace,
    /// Append incoming lines and folders under fresh IDs
    Merge,
}

impl std::fmt::Display for ImportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportMode::Replace => write!(f, "replace"),
            ImportMode::Merge => write!(f, "merge"),
        }
    }
}

/// An incoming document; every top-level field is optional
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportDocument {
    pub items: Option<Vec<Item>>,
    pub expenses: Option<Vec<Expense>>,
    pub folders: Option<Vec<Folder>>,
    pub history: Option<History>,
    pub settings: Option<Settings>,
}

impl ImportDocument {
    /// Decode and validate an incoming document
    ///
    /// Any malformed entry rejects the whole document.
    pub fn parse(json: &str) -> FincalcResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| FincalcError::Import(format!("Invalid document: {}", e)))
    }

    /// Expected top-level fields that are absent
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.items.is_none() {
            missing.push("items");
        }
        if self.expenses.is_none() {
            missing.push("expenses");
        }
        missing
    }

    /// Whether the document has the expected shape
    pub fn has_expected_structure(&self) -> bool {
        self.missing_fields().is_empty()
    }

    fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    fn expense_count(&self) -> usize {
        self.expenses.as_ref().map_or(0, Vec::len)
    }

    fn folder_count(&self) -> usize {
        self.folders.as_ref().map_or(0, Vec::len)
    }
}

/// What an import did (or would do)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    pub mode: ImportMode,
    pub items: usize,
    pub expenses: usize,
    pub folders: usize,
    /// Number of history months written (replace only)
    pub history_months: usize,
    /// Whether settings were overwritten (replace only)
    pub settings_replaced: bool,
    /// Expected fields that were absent and treated as empty
    pub missing_fields: Vec<&'static str>,
}

impl ImportResult {
    fn describe(incoming: &ImportDocument, mode: ImportMode) -> Self {
        let replace = mode == ImportMode::Replace;
        Self {
            mode,
            items: incoming.item_count(),
            expenses: incoming.expense_count(),
            folders: incoming.folder_count(),
            history_months: if replace {
                incoming.history.as_ref().map_or(0, History::len)
            } else {
                0
            },
            settings_replaced: replace && incoming.settings.is_some(),
            missing_fields: incoming.missing_fields(),
        }
    }

    /// One-line human summary
    pub fn summary_line(&self) -> String {
        format!(
            "{}: {} items, {} expenses, {} folders",
            self.mode, self.items, self.expenses, self.folders
        )
    }
}

/// Substitute the stored collections with the incoming ones
///
/// Incoming month summaries are rewritten from their lines.
pub fn apply_replace(doc: &mut Document, incoming: ImportDocument) {
    doc.items = incoming.items.unwrap_or_default();
    doc.expenses = incoming.expenses.unwrap_or_default();
    doc.folders = incoming.folders.unwrap_or_default();
    doc.history = incoming.history.unwrap_or_default();
    history::recompute_all_summaries(&mut doc.history);
    if let Some(settings) = incoming.settings {
        doc.settings = settings;
    }
}

/// Append incoming lines and folders under fresh IDs; settings and history stay
pub fn apply_merge(doc: &mut Document, incoming: ImportDocument) {
    doc.items.extend(
        incoming
            .items
            .unwrap_or_default()
            .iter()
            .map(Item::with_fresh_id),
    );
    doc.expenses.extend(
        incoming
            .expenses
            .unwrap_or_default()
            .iter()
            .map(Expense::with_fresh_id),
    );
    doc.folders.extend(
        incoming
            .folders
            .unwrap_or_default()
            .iter()
            .map(Folder::with_fresh_ids),
    );
}

/// Apply a validated document in the given mode
pub fn apply(doc: &mut Document, incoming: ImportDocument, mode: ImportMode) {
    match mode {
        ImportMode::Replace => apply_replace(doc, incoming),
        ImportMode::Merge => apply_merge(doc, incoming),
    }
}

/// Service for document import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Describe what importing `incoming` would do, without touching storage
    pub fn preview(&self, incoming: &ImportDocument, mode: ImportMode) -> ImportResult {
        ImportResult::describe(incoming, mode)
    }

    /// Import a document from JSON text
    ///
    /// If `items` or `expenses` is absent and `confirm_mismatch` is false,
    /// fails with [`FincalcError::StructuralMismatch`] and changes nothing.
    pub fn import_json(
        &self,
        json: &str,
        mode: ImportMode,
        confirm_mismatch: bool,
    ) -> FincalcResult<ImportResult> {
        let incoming = ImportDocument::parse(json)?;
        self.import(incoming, mode, confirm_mismatch)
    }

    /// Import an already decoded document
    pub fn import(
        &self,
        incoming: ImportDocument,
        mode: ImportMode,
        confirm_mismatch: bool,
    ) -> FincalcResult<ImportResult> {
        let missing = incoming.missing_fields();
        if !missing.is_empty() {
            if !confirm_mismatch {
                return Err(FincalcError::StructuralMismatch { missing });
            }
            warn!(missing = ?missing, "importing document with unexpected structure");
        }

        let result = ImportResult::describe(&incoming, mode);
        self.storage.ledger.mutate(|doc| {
            apply(doc, incoming, mode);
            Ok(())
        })?;

        info!(mode = %mode, items = result.items, expenses = result.expenses, "document imported");
        self.storage
            .log_import(mode.to_string(), result.summary_line());
        Ok(result)
    }
}
