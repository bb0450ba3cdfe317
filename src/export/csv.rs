//! CSV Export functionality
//!
//! Exports the live ledger lines (items and expenses) with their totals, one
//! row per line, for use in a spreadsheet.

use std::io::Write;

use serde::Serialize;

use crate::error::{FincalcError, FincalcResult};
use crate::models::{Document, Expense, Item};
use crate::services::calculator;
use crate::storage::Storage;

/// Column names, written even when the ledger has no lines
const HEADERS: [&str; 8] = [
    "Kind",
    "ID",
    "Description",
    "Category",
    "Price",
    "Quantity",
    "Measure",
    "Total",
];

/// One row of the ledger CSV, in `HEADERS` order
#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    kind: &'static str,
    id: &'a str,
    description: &'a str,
    category: String,
    price: f64,
    quantity: Option<f64>,
    measure: String,
    total: f64,
}

impl<'a> LedgerRow<'a> {
    fn item(item: &'a Item) -> Self {
        Self {
            kind: "item",
            id: item.id.as_str(),
            description: &item.description,
            category: String::new(),
            price: item.price_per_unit.value(),
            quantity: Some(item.quantity.value()),
            measure: item.measure.to_string(),
            total: calculator::line_total(item).value(),
        }
    }

    fn expense(expense: &'a Expense) -> Self {
        Self {
            kind: "expense",
            id: expense.id.as_str(),
            description: &expense.description,
            category: expense.category.to_string(),
            price: expense.price.value(),
            quantity: expense.days.map(|d| d.value()),
            measure: if expense.days.is_some() {
                "days".to_string()
            } else {
                String::new()
            },
            total: calculator::expense_total(expense).value(),
        }
    }
}

/// Write the live lines of a document as CSV
pub fn write_ledger_csv<W: Write>(document: &Document, writer: W) -> FincalcResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer
        .write_record(HEADERS)
        .map_err(|e| FincalcError::Export(e.to_string()))?;

    let rows = document
        .items
        .iter()
        .map(LedgerRow::item)
        .chain(document.expenses.iter().map(LedgerRow::expense));

    for row in rows {
        csv_writer
            .serialize(row)
            .map_err(|e| FincalcError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| FincalcError::Export(e.to_string()))?;
    Ok(())
}

/// Export the stored ledger lines to CSV
pub fn export_ledger_csv<W: Write>(storage: &Storage, writer: W) -> FincalcResult<()> {
    let document = storage.ledger.snapshot()?;
    write_ledger_csv(&document, writer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_csv() {
        let mut output = Vec::new();
        write_ledger_csv(&Document::with_examples(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "Kind,ID,Description,Category,Price,Quantity,Measure,Total"
        );
        assert!(lines[1].starts_with("item,item_"));
        assert!(lines[1].ends_with("Example: 1m of pipe,,20.0,10.0,m,200.0"));
        assert!(lines[2].contains("Team salaries,Salaries,1000.0,30.0,days,30000.0"));
    }

    #[test]
    fn test_empty_ledger_writes_header_only() {
        let mut output = Vec::new();
        write_ledger_csv(&Document::default(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "Kind,ID,Description,Category,Price,Quantity,Measure,Total\n"
        );
    }
}
