//! Ledger display formatting
//!
//! Formats the live items, expenses and totals for terminal output.

use crate::models::{Expense, Item};
use crate::services::calculator::{self, LedgerTotals};

use super::currency::{format_amount, Currency};

/// Format the live items as a table
pub fn format_item_list(items: &[Item]) -> String {
    if items.is_empty() {
        return "No items.".to_string();
    }

    let desc_width = items
        .iter()
        .map(|i| i.description.chars().count())
        .max()
        .unwrap_or(11)
        .max(11);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16}  {:<desc_width$}  {:>10}  {:<5}  {:>16}  {:>16}\n",
        "ID",
        "Description",
        "Quantity",
        "Unit",
        "Price",
        "Total",
        desc_width = desc_width,
    ));
    output.push_str(&format!(
        "{:-<16}  {:-<desc_width$}  {:->10}  {:-<5}  {:->16}  {:->16}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        desc_width = desc_width,
    ));

    for item in items {
        output.push_str(&format!(
            "{:<16}  {:<desc_width$}  {:>10}  {:<5}  {:>16}  {:>16}\n",
            item.id.short(),
            item.description,
            item.quantity.to_string(),
            item.measure.to_string(),
            format_amount(item.price_per_unit, Currency::Ars),
            format_amount(calculator::line_total(item), Currency::Ars),
            desc_width = desc_width,
        ));
    }

    output
}

/// Format the live expenses as a table
pub fn format_expense_list(expenses: &[Expense]) -> String {
    if expenses.is_empty() {
        return "No expenses.".to_string();
    }

    let desc_width = expenses
        .iter()
        .map(|e| e.description.chars().count())
        .max()
        .unwrap_or(11)
        .max(11);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16}  {:<desc_width$}  {:<8}  {:>16}  {:>6}  {:>16}\n",
        "ID",
        "Description",
        "Category",
        "Price",
        "Days",
        "Total",
        desc_width = desc_width,
    ));
    output.push_str(&format!(
        "{:-<16}  {:-<desc_width$}  {:-<8}  {:->16}  {:->6}  {:->16}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        desc_width = desc_width,
    ));

    for expense in expenses {
        let days = expense.days.map(|d| d.to_string()).unwrap_or_default();
        output.push_str(&format!(
            "{:<16}  {:<desc_width$}  {:<8}  {:>16}  {:>6}  {:>16}\n",
            expense.id.short(),
            expense.description,
            expense.category.to_string(),
            format_amount(expense.price, Currency::Ars),
            days,
            format_amount(calculator::expense_total(expense), Currency::Ars),
            desc_width = desc_width,
        ));
    }

    output
}

/// Format the totals block, with USD equivalents when present
pub fn format_totals(totals: &LedgerTotals) -> String {
    let rows = [
        ("Subtotal", totals.summary.subtotal(), totals.usd.map(|u| u.subtotal())),
        (
            "Total expenses",
            totals.summary.total_expenses(),
            totals.usd.map(|u| u.total_expenses()),
        ),
        (
            "Net balance",
            totals.summary.net_balance(),
            totals.usd.map(|u| u.net_balance()),
        ),
    ];

    let mut output = String::new();
    for (label, ars, usd) in rows {
        output.push_str(&format!("{:<16}{:>18}", label, format_amount(ars, Currency::Ars)));
        if let Some(usd) = usd {
            output.push_str(&format!("  ({} USD)", format_amount(usd, Currency::Usd)));
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{Document, Summary};

    #[test]
    fn test_item_list() {
        let doc = Document::with_examples();
        let output = format_item_list(&doc.items);

        assert!(output.contains("Example: 1m of pipe"));
        assert!(output.contains("$ 200,00"));
        assert_eq!(format_item_list(&[]), "No items.");
    }

    #[test]
    fn test_expense_list_shows_days() {
        let doc = Document::with_examples();
        let output = format_expense_list(&doc.expenses);

        assert!(output.contains("Salaries"));
        assert!(output.contains("30"));
        assert!(output.contains("$ 30.000,00"));
    }

    #[test]
    fn test_totals_with_usd() {
        let doc = Document::with_examples();
        let settings = Settings {
            show_usd: true,
            ..Settings::default()
        };
        let totals = calculator::ledger_totals(&doc.items, &doc.expenses, &settings);
        let output = format_totals(&totals);

        assert!(output.contains("-$ 29.800,00"));
        assert!(output.contains("USD"));
    }

    #[test]
    fn test_totals_without_usd() {
        let totals = LedgerTotals {
            summary: Summary::default(),
            usd: None,
        };
        let output = format_totals(&totals);
        assert!(output.contains("$ 0,00"));
        assert!(!output.contains("USD"));
    }
}
