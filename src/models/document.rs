//! The ledger document
//!
//! Everything the application persists lives in one document: the live
//! ledger (items and expenses), archived folders, monthly history and the
//! display settings. The same shape is used for export and import.

use serde::{Deserialize, Serialize};

use super::expense::{Expense, ExpenseCategory};
use super::folder::Folder;
use super::history::History;
use super::ids::{ExpenseId, FolderId, ItemId};
use super::item::{Item, Measure};
use crate::config::settings::Settings;

/// The complete persisted state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Document {
    /// Live income lines
    #[serde(default)]
    pub items: Vec<Item>,

    /// Live expenses
    #[serde(default)]
    pub expenses: Vec<Expense>,

    /// Archive folders
    #[serde(default)]
    pub folders: Vec<Folder>,

    /// Monthly snapshots
    #[serde(default)]
    pub history: History,

    /// Display settings
    #[serde(default)]
    pub settings: Settings,
}

impl Document {
    /// Document seeded with one example item and one example expense
    pub fn with_examples() -> Self {
        Self {
            items: vec![Item::new(
                "Example: 1m of pipe",
                20.0,
                10.0,
                Measure::Meter,
            )],
            expenses: vec![Expense::new(
                "Team salaries",
                ExpenseCategory::Salaries,
                1000.0,
                Some(30.0.into()),
            )],
            ..Self::default()
        }
    }

    /// Whether the document holds no live lines and no folders
    pub fn is_blank(&self) -> bool {
        self.items.is_empty() && self.expenses.is_empty() && self.folders.is_empty()
    }

    /// Find a live item by ID
    pub fn item(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Find a live item by ID for editing
    pub fn item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|i| &i.id == id)
    }

    /// Find a live expense by ID
    pub fn expense(&self, id: &ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| &e.id == id)
    }

    /// Find a live expense by ID for editing
    pub fn expense_mut(&mut self, id: &ExpenseId) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|e| &e.id == id)
    }

    /// Find a folder by ID
    pub fn folder(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| &f.id == id)
    }

    /// Find a folder by ID for editing
    pub fn folder_mut(&mut self, id: &FolderId) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| &f.id == id)
    }

    /// Find a folder by exact ID, falling back to a case-insensitive name match
    pub fn find_folder(&self, identifier: &str) -> Option<&Folder> {
        let identifier = identifier.trim();
        self.folders
            .iter()
            .find(|f| f.id.as_str() == identifier)
            .or_else(|| {
                let lower = identifier.to_lowercase();
                self.folders.iter().find(|f| f.name.to_lowercase() == lower)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document() {
        let doc = Document::default();
        assert!(doc.items.is_empty());
        assert!(doc.expenses.is_empty());
        assert!(doc.folders.is_empty());
        assert!(doc.history.is_empty());
        assert_eq!(doc.settings.exchange_rate.value(), 350.0);
        assert!(!doc.settings.show_usd);
        assert!(doc.is_blank());
    }

    #[test]
    fn test_examples() {
        let doc = Document::with_examples();
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.expenses.len(), 1);
        assert_eq!(doc.expenses[0].category, ExpenseCategory::Salaries);
        assert!(!doc.is_blank());
    }

    #[test]
    fn test_deserialize_empty_object() {
        let doc: Document = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, Document::default());
    }

    #[test]
    fn test_find_folder_by_id_or_name() {
        let mut doc = Document::default();
        let folder = Folder::new("Clients");
        let id = folder.id.clone();
        doc.folders.push(folder);

        assert_eq!(doc.find_folder(id.as_str()).unwrap().name, "Clients");
        assert_eq!(doc.find_folder("clients").unwrap().id, id);
        assert!(doc.find_folder("suppliers").is_none());
    }

    #[test]
    fn test_serialization_shape() {
        let doc = Document::with_examples();
        let json = serde_json::to_value(&doc).unwrap();

        for key in ["items", "expenses", "folders", "history", "settings"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["settings"]["exchangeRate"], 350.0);
        assert_eq!(json["settings"]["showUSD"], false);
    }
}
