//! Ledger service
//!
//! Add, edit and remove the live income lines and expenses, edit the display
//! settings, and reset the whole document. Each operation is a plain function
//! over `&mut Document`; [`LedgerService`] runs them through the repository so
//! they are saved and audited.

use tracing::info;

use crate::audit::EntityType;
use crate::config::Settings;
use crate::error::{FincalcError, FincalcResult};
use crate::models::{
    Amount, Document, Expense, ExpenseCategory, ExpenseId, Item, ItemId, Measure,
};
use crate::storage::Storage;

use super::calculator::{self, LedgerTotals};

/// Field-by-field changes to an item; `None` leaves the field as is
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub description: Option<String>,
    pub price_per_unit: Option<Amount>,
    pub quantity: Option<Amount>,
    pub measure: Option<Measure>,
}

impl ItemPatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.price_per_unit.is_none()
            && self.quantity.is_none()
            && self.measure.is_none()
    }

    fn apply(self, item: &mut Item) {
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(price) = self.price_per_unit {
            item.price_per_unit = price;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(measure) = self.measure {
            item.measure = measure;
        }
    }
}

/// Field-by-field changes to an expense; `None` leaves the field as is
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub description: Option<String>,
    pub category: Option<ExpenseCategory>,
    pub price: Option<Amount>,
    pub days: Option<Amount>,
}

impl ExpensePatch {
    /// Whether the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.days.is_none()
    }

    fn apply(self, expense: &mut Expense) {
        if let Some(description) = self.description {
            expense.description = description;
        }
        // Days first, so switching to salaries keeps explicitly supplied days.
        if let Some(days) = self.days {
            expense.days = Some(days);
        }
        if let Some(category) = self.category {
            expense.set_category(category);
        }
        if let Some(price) = self.price {
            expense.price = price;
        }
    }
}

/// Append an item to the live ledger
pub fn add_item(doc: &mut Document, item: Item) -> ItemId {
    let id = item.id.clone();
    doc.items.push(item);
    id
}

/// Append an expense to the live ledger
pub fn add_expense(doc: &mut Document, expense: Expense) -> ExpenseId {
    let id = expense.id.clone();
    doc.expenses.push(expense);
    id
}

/// Edit an item in place, returning its state before and after
pub fn update_item(
    doc: &mut Document,
    id: &ItemId,
    patch: ItemPatch,
) -> FincalcResult<(Item, Item)> {
    let item = doc
        .item_mut(id)
        .ok_or_else(|| FincalcError::item_not_found(id.as_str()))?;
    let before = item.clone();
    patch.apply(item);
    Ok((before, item.clone()))
}

/// Edit an expense in place, returning its state before and after
pub fn update_expense(
    doc: &mut Document,
    id: &ExpenseId,
    patch: ExpensePatch,
) -> FincalcResult<(Expense, Expense)> {
    let expense = doc
        .expense_mut(id)
        .ok_or_else(|| FincalcError::expense_not_found(id.as_str()))?;
    let before = expense.clone();
    patch.apply(expense);
    Ok((before, expense.clone()))
}

/// Remove an item from the live ledger
pub fn remove_item(doc: &mut Document, id: &ItemId) -> FincalcResult<Item> {
    let index = doc
        .items
        .iter()
        .position(|i| &i.id == id)
        .ok_or_else(|| FincalcError::item_not_found(id.as_str()))?;
    Ok(doc.items.remove(index))
}

/// Remove an expense from the live ledger
pub fn remove_expense(doc: &mut Document, id: &ExpenseId) -> FincalcResult<Expense> {
    let index = doc
        .expenses
        .iter()
        .position(|e| &e.id == id)
        .ok_or_else(|| FincalcError::expense_not_found(id.as_str()))?;
    Ok(doc.expenses.remove(index))
}

/// Service for the live ledger and its settings
pub struct LedgerService<'a> {
    storage: &'a Storage,
}

impl<'a> LedgerService<'a> {
    /// Create a new ledger service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All live items
    pub fn items(&self) -> FincalcResult<Vec<Item>> {
        self.storage.ledger.read(|doc| doc.items.clone())
    }

    /// All live expenses
    pub fn expenses(&self) -> FincalcResult<Vec<Expense>> {
        self.storage.ledger.read(|doc| doc.expenses.clone())
    }

    /// Current settings
    pub fn settings(&self) -> FincalcResult<Settings> {
        self.storage.ledger.read(|doc| doc.settings)
    }

    /// Resolve a full or unambiguous partial item ID
    pub fn resolve_item(&self, identifier: &str) -> FincalcResult<ItemId> {
        self.storage
            .ledger
            .read(|doc| {
                super::match_id(doc.items.iter().map(|i| i.id.as_str()), identifier)
                    .map(ItemId::from_string)
            })?
            .ok_or_else(|| FincalcError::item_not_found(identifier))
    }

    /// Resolve a full or unambiguous partial expense ID
    pub fn resolve_expense(&self, identifier: &str) -> FincalcResult<ExpenseId> {
        self.storage
            .ledger
            .read(|doc| {
                super::match_id(doc.expenses.iter().map(|e| e.id.as_str()), identifier)
                    .map(ExpenseId::from_string)
            })?
            .ok_or_else(|| FincalcError::expense_not_found(identifier))
    }

    /// Live totals, with USD equivalents when enabled
    pub fn totals(&self) -> FincalcResult<LedgerTotals> {
        self.storage
            .ledger
            .read(|doc| calculator::ledger_totals(&doc.items, &doc.expenses, &doc.settings))
    }

    /// Add an item
    pub fn add_item(&self, item: Item) -> FincalcResult<Item> {
        let added = item.clone();
        self.storage.ledger.mutate(|doc| Ok(add_item(doc, item)))?;

        info!(id = %added.id, "item added");
        self.storage.log_create(
            EntityType::Item,
            added.id.as_str(),
            Some(added.description.clone()),
            &added,
        );
        Ok(added)
    }

    /// Add an expense
    pub fn add_expense(&self, expense: Expense) -> FincalcResult<Expense> {
        let added = expense.clone();
        self.storage
            .ledger
            .mutate(|doc| Ok(add_expense(doc, expense)))?;

        info!(id = %added.id, "expense added");
        self.storage.log_create(
            EntityType::Expense,
            added.id.as_str(),
            Some(added.description.clone()),
            &added,
        );
        Ok(added)
    }

    /// Edit an item
    pub fn update_item(&self, id: &ItemId, patch: ItemPatch) -> FincalcResult<Item> {
        let (before, after) = self
            .storage
            .ledger
            .mutate(|doc| update_item(doc, id, patch))?;

        self.storage.log_update(
            EntityType::Item,
            after.id.as_str(),
            Some(after.description.clone()),
            &before,
            &after,
            None,
        );
        Ok(after)
    }

    /// Edit an expense
    pub fn update_expense(&self, id: &ExpenseId, patch: ExpensePatch) -> FincalcResult<Expense> {
        let (before, after) = self
            .storage
            .ledger
            .mutate(|doc| update_expense(doc, id, patch))?;

        self.storage.log_update(
            EntityType::Expense,
            after.id.as_str(),
            Some(after.description.clone()),
            &before,
            &after,
            None,
        );
        Ok(after)
    }

    /// Remove an item
    pub fn remove_item(&self, id: &ItemId) -> FincalcResult<Item> {
        let removed = self.storage.ledger.mutate(|doc| remove_item(doc, id))?;

        self.storage.log_delete(
            EntityType::Item,
            removed.id.as_str(),
            Some(removed.description.clone()),
            &removed,
        );
        Ok(removed)
    }

    /// Remove an expense
    pub fn remove_expense(&self, id: &ExpenseId) -> FincalcResult<Expense> {
        let removed = self.storage.ledger.mutate(|doc| remove_expense(doc, id))?;

        self.storage.log_delete(
            EntityType::Expense,
            removed.id.as_str(),
            Some(removed.description.clone()),
            &removed,
        );
        Ok(removed)
    }

    /// Set the ARS-per-USD exchange rate
    pub fn set_exchange_rate(&self, rate: Amount) -> FincalcResult<Settings> {
        self.update_settings(|settings| settings.exchange_rate = rate)
    }

    /// Turn the USD equivalents on or off
    pub fn set_show_usd(&self, show: bool) -> FincalcResult<Settings> {
        self.update_settings(|settings| settings.show_usd = show)
    }

    fn update_settings(&self, f: impl FnOnce(&mut Settings)) -> FincalcResult<Settings> {
        let (before, after) = self.storage.ledger.mutate(|doc| {
            let before = doc.settings;
            f(&mut doc.settings);
            Ok((before, doc.settings))
        })?;

        self.storage
            .log_update(EntityType::Settings, "settings", None, &before, &after, None);
        Ok(after)
    }

    /// Replace the whole document with the default one
    pub fn reset(&self) -> FincalcResult<()> {
        let before = self.storage.ledger.snapshot()?;
        self.storage.ledger.replace(Document::default())?;

        info!("ledger reset");
        self.storage.log_delete(
            EntityType::Ledger,
            "ledger",
            None,
            &serde_json::json!({
                "items": before.items.len(),
                "expenses": before.expenses.len(),
                "folders": before.folders.len(),
                "history": before.history.len(),
            }),
        );
        Ok(())
    }
}
