//! Expense model
//!
//! An expense is an outflow. How its total is computed depends on the
//! category: salaries are billed per day, everything else is a flat price.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::ids::ExpenseId;

/// How an expense's total is derived from its fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingRule {
    /// `price` is the whole cost
    Flat,
    /// `price` is a day rate, multiplied by `days`
    DayRate,
}

/// Expense category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ExpenseCategory {
    /// Wages, billed per day
    #[serde(alias = "Salarios")]
    Salaries,
    /// General expenses
    #[default]
    #[serde(alias = "Generales")]
    General,
    /// Anything else
    #[serde(alias = "Otros")]
    Other,
}

impl ExpenseCategory {
    /// Days assumed when an expense becomes a salary without a day count
    pub const DEFAULT_SALARY_DAYS: f64 = 30.0;

    /// The billing rule this category uses
    pub fn billing_rule(&self) -> BillingRule {
        match self {
            Self::Salaries => BillingRule::DayRate,
            Self::General | Self::Other => BillingRule::Flat,
        }
    }

    /// Parse a category from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "salaries" | "salary" | "salarios" => Some(Self::Salaries),
            "general" | "generales" => Some(Self::General),
            "other" | "otros" => Some(Self::Other),
            _ => None,
        }
    }

    /// All categories in display order
    pub fn all() -> &'static [ExpenseCategory] {
        &[Self::Salaries, Self::General, Self::Other]
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Salaries => write!(f, "Salaries"),
            Self::General => write!(f, "General"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// An expense line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier within the expenses collection
    #[serde(default)]
    pub id: ExpenseId,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Category, which selects the billing rule
    #[serde(default)]
    pub category: ExpenseCategory,

    /// Flat price, or day rate for salaries
    #[serde(default)]
    pub price: Amount,

    /// Number of days; only meaningful for salaries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<Amount>,
}

impl Expense {
    /// Default description for a freshly added expense
    pub const DEFAULT_DESCRIPTION: &'static str = "Expense";

    /// Create a new expense
    ///
    /// A salary created without a day count gets the default 30 days.
    pub fn new(
        description: impl Into<String>,
        category: ExpenseCategory,
        price: impl Into<Amount>,
        days: Option<Amount>,
    ) -> Self {
        let mut expense = Self {
            id: ExpenseId::new(),
            description: description.into(),
            category,
            price: price.into(),
            days,
        };
        expense.ensure_days();
        expense
    }

    /// Change the category, filling in default days when switching to salaries
    pub fn set_category(&mut self, category: ExpenseCategory) {
        self.category = category;
        self.ensure_days();
    }

    /// Copy of this expense under a freshly generated ID
    pub fn with_fresh_id(&self) -> Self {
        Self {
            id: ExpenseId::new(),
            ..self.clone()
        }
    }

    fn ensure_days(&mut self) {
        if self.category.billing_rule() == BillingRule::DayRate && self.days.is_none() {
            self.days = Some(Amount::new(ExpenseCategory::DEFAULT_SALARY_DAYS));
        }
    }
}

impl Default for Expense {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_DESCRIPTION,
            ExpenseCategory::General,
            0.0,
            None,
        )
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.category.billing_rule(), self.days) {
            (BillingRule::DayRate, Some(days)) => write!(
                f,
                "{} [{}] {} x {} days",
                self.description, self.category, self.price, days
            ),
            _ => write!(f, "{} [{}] {}", self.description, self.category, self.price),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expense() {
        let expense = Expense::default();
        assert_eq!(expense.description, "Expense");
        assert_eq!(expense.category, ExpenseCategory::General);
        assert!(expense.days.is_none());
    }

    #[test]
    fn test_salary_defaults_to_thirty_days() {
        let expense = Expense::new("Team", ExpenseCategory::Salaries, 1000.0, None);
        assert_eq!(expense.days, Some(Amount::from(30.0)));
    }

    #[test]
    fn test_salary_keeps_supplied_days() {
        let expense = Expense::new(
            "Team",
            ExpenseCategory::Salaries,
            1000.0,
            Some(Amount::from(12.5)),
        );
        assert_eq!(expense.days, Some(Amount::from(12.5)));
    }

    #[test]
    fn test_switching_to_salaries_fills_days() {
        let mut expense = Expense::default();
        expense.set_category(ExpenseCategory::Salaries);
        assert_eq!(expense.days, Some(Amount::from(30.0)));

        expense.days = Some(Amount::from(5.0));
        expense.set_category(ExpenseCategory::Other);
        expense.set_category(ExpenseCategory::Salaries);
        assert_eq!(expense.days, Some(Amount::from(5.0)));
    }

    #[test]
    fn test_billing_rules() {
        assert_eq!(
            ExpenseCategory::Salaries.billing_rule(),
            BillingRule::DayRate
        );
        assert_eq!(ExpenseCategory::General.billing_rule(), BillingRule::Flat);
        assert_eq!(ExpenseCategory::Other.billing_rule(), BillingRule::Flat);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(
            ExpenseCategory::parse("salaries"),
            Some(ExpenseCategory::Salaries)
        );
        assert_eq!(
            ExpenseCategory::parse("Otros"),
            Some(ExpenseCategory::Other)
        );
        assert_eq!(ExpenseCategory::parse("rent"), None);
    }

    #[test]
    fn test_serialization_omits_missing_days() {
        let expense = Expense::new("Paper", ExpenseCategory::General, 500.0, None);
        let json = serde_json::to_value(&expense).unwrap();

        assert_eq!(json["category"], "General");
        assert_eq!(json["price"], 500.0);
        assert!(json.get("days").is_none());
    }

    #[test]
    fn test_deserialize_legacy_category() {
        let expense: Expense = serde_json::from_str(
            r#"{"id":"exp_1","description":"Sueldos","category":"Salarios","price":1000,"days":30}"#,
        )
        .unwrap();

        assert_eq!(expense.category, ExpenseCategory::Salaries);
        assert_eq!(expense.days, Some(Amount::from(30.0)));
    }
}
