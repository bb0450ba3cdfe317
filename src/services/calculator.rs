//! Ledger arithmetic
//!
//! Pure functions deriving line, expense and aggregate totals. Operands are
//! already coerced to finite numbers by [`Amount`], so nothing here can fail
//! or produce NaN.

use crate::config::Settings;
use crate::models::{Amount, BillingRule, Expense, Item, Summary};

/// Total for one income line: `quantity * price_per_unit`
pub fn line_total(item: &Item) -> Amount {
    item.quantity * item.price_per_unit
}

/// Total for one expense according to its category's billing rule
///
/// A day-rated expense without a day count totals zero.
pub fn expense_total(expense: &Expense) -> Amount {
    match expense.category.billing_rule() {
        BillingRule::DayRate => expense.price * expense.days.unwrap_or_default(),
        BillingRule::Flat => expense.price,
    }
}

/// Sum of all line totals
pub fn subtotal(items: &[Item]) -> Amount {
    items.iter().map(line_total).sum()
}

/// Sum of all expense totals
pub fn total_expenses(expenses: &[Expense]) -> Amount {
    expenses.iter().map(expense_total).sum()
}

/// Derived totals for an items/expenses pair
pub fn snapshot_summary(items: &[Item], expenses: &[Expense]) -> Summary {
    Summary::new(subtotal(items), total_expenses(expenses))
}

/// Totals of the live ledger, with USD equivalents when enabled
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerTotals {
    /// Totals in the ledger currency
    pub summary: Summary,
    /// Same totals divided by the exchange rate, if USD display is on
    pub usd: Option<Summary>,
}

/// Compute the live totals under the given settings
pub fn ledger_totals(items: &[Item], expenses: &[Expense], settings: &Settings) -> LedgerTotals {
    let summary = snapshot_summary(items, expenses);
    let usd = settings
        .usd_rate()
        .and_then(|rate| summary.converted(rate));
    LedgerTotals { summary, usd }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, Measure};

    fn item(quantity: f64, price: f64) -> Item {
        Item::new("Line", price, quantity, Measure::Unit)
    }

    #[test]
    fn test_line_total() {
        assert_eq!(line_total(&item(10.0, 20.0)).value(), 200.0);
        assert_eq!(line_total(&item(0.5, 20.0)).value(), 10.0);
    }

    #[test]
    fn test_line_total_with_non_numeric_quantity() {
        let item: Item =
            serde_json::from_str(r#"{"quantity":"x","pricePerUnit":5}"#).unwrap();
        assert_eq!(line_total(&item).value(), 0.0);
    }

    #[test]
    fn test_line_total_with_missing_fields() {
        let item: Item = serde_json::from_str(r#"{"description":"blank"}"#).unwrap();
        assert!(line_total(&item).is_zero());
    }

    #[test]
    fn test_salary_expense_total() {
        let expense = Expense::new(
            "Team",
            ExpenseCategory::Salaries,
            1000.0,
            Some(Amount::from(30.0)),
        );
        assert_eq!(expense_total(&expense).value(), 30000.0);
    }

    #[test]
    fn test_flat_expense_total() {
        let expense = Expense::new("Paper", ExpenseCategory::General, 500.0, None);
        assert_eq!(expense_total(&expense).value(), 500.0);

        let other = Expense::new("Misc", ExpenseCategory::Other, 75.5, Some(Amount::from(3.0)));
        assert_eq!(expense_total(&other).value(), 75.5);
    }

    #[test]
    fn test_salary_without_days_is_zero() {
        let expense: Expense =
            serde_json::from_str(r#"{"category":"Salaries","price":1000}"#).unwrap();
        assert!(expense.days.is_none());
        assert!(expense_total(&expense).is_zero());
    }

    #[test]
    fn test_empty_summary() {
        let summary = snapshot_summary(&[], &[]);
        assert_eq!(summary, Summary::default());
    }

    #[test]
    fn test_summary_net_balance() {
        let items = vec![item(10.0, 20.0), item(2.0, 50.0)];
        let expenses = vec![
            Expense::new("Paper", ExpenseCategory::General, 120.0, None),
            Expense::new("Help", ExpenseCategory::Salaries, 10.0, Some(Amount::from(1.5))),
        ];

        let summary = snapshot_summary(&items, &expenses);
        assert_eq!(summary.subtotal().value(), 300.0);
        assert_eq!(summary.total_expenses().value(), 135.0);
        assert_eq!(summary.net_balance(), summary.subtotal() - summary.total_expenses());
        assert_eq!(summary.net_balance().value(), 165.0);
    }

    #[test]
    fn test_ledger_totals_usd() {
        let items = vec![item(1.0, 700.0)];
        let mut settings = Settings::default();

        let totals = ledger_totals(&items, &[], &settings);
        assert!(totals.usd.is_none());

        settings.show_usd = true;
        let totals = ledger_totals(&items, &[], &settings);
        assert_eq!(totals.usd.unwrap().subtotal().value(), 2.0);
    }
}
