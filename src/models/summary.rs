//! Summary model
//!
//! A summary is the derived totals of an items/expenses pair. Stored
//! summaries inside jobs and history entries are a cache: they are rewritten
//! from the stored lines whenever they are read for display.

use serde::{Deserialize, Serialize};

use super::amount::Amount;

/// Derived totals for a set of items and expenses
///
/// The net balance is always `subtotal - total_expenses`; a stored
/// `netBalance` is ignored on read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", from = "StoredSummary")]
pub struct Summary {
    subtotal: Amount,
    total_expenses: Amount,
    net_balance: Amount,
}

/// On-disk form of a summary
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSummary {
    #[serde(default)]
    subtotal: Amount,
    #[serde(default)]
    total_expenses: Amount,
}

impl From<StoredSummary> for Summary {
    fn from(stored: StoredSummary) -> Self {
        Self::new(stored.subtotal, stored.total_expenses)
    }
}

impl Summary {
    /// Build a summary from its two inputs; the net balance is always derived
    pub fn new(subtotal: Amount, total_expenses: Amount) -> Self {
        Self {
            subtotal,
            total_expenses,
            net_balance: subtotal - total_expenses,
        }
    }

    /// Sum of all line totals
    pub fn subtotal(&self) -> Amount {
        self.subtotal
    }

    /// Sum of all expense totals
    pub fn total_expenses(&self) -> Amount {
        self.total_expenses
    }

    /// `subtotal - total_expenses`
    pub fn net_balance(&self) -> Amount {
        self.net_balance
    }

    /// Convert every total by dividing by an exchange rate
    ///
    /// Returns `None` when the rate is not positive.
    pub fn converted(&self, rate: Amount) -> Option<Self> {
        if !rate.is_positive() {
            return None;
        }
        Some(Self::new(self.subtotal / rate, self.total_expenses / rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_balance_is_derived() {
        let summary = Summary::new(Amount::from(200.0), Amount::from(50.0));
        assert_eq!(summary.net_balance().value(), 150.0);
    }

    #[test]
    fn test_default_is_zero() {
        let summary = Summary::default();
        assert!(summary.subtotal().is_zero());
        assert!(summary.total_expenses().is_zero());
        assert!(summary.net_balance().is_zero());
    }

    #[test]
    fn test_converted() {
        let summary = Summary::new(Amount::from(700.0), Amount::from(350.0));
        let usd = summary.converted(Amount::from(350.0)).unwrap();

        assert_eq!(usd.subtotal().value(), 2.0);
        assert_eq!(usd.total_expenses().value(), 1.0);
        assert_eq!(usd.net_balance().value(), 1.0);

        assert!(summary.converted(Amount::zero()).is_none());
        assert!(summary.converted(Amount::from(-1.0)).is_none());
    }

    #[test]
    fn test_serialization_shape() {
        let summary = Summary::new(Amount::from(10.0), Amount::from(4.0));
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["subtotal"], 10.0);
        assert_eq!(json["totalExpenses"], 4.0);
        assert_eq!(json["netBalance"], 6.0);
    }

    #[test]
    fn test_stored_net_balance_is_rederived() {
        let summary: Summary = serde_json::from_str(
            r#"{"subtotal": 200, "totalExpenses": 50, "netBalance": 999}"#,
        )
        .unwrap();
        assert_eq!(summary.net_balance().value(), 150.0);

        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["netBalance"], 150.0);
    }
}
