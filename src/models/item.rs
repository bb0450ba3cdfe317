//! Income line model
//!
//! An item is one billable line: a quantity of something at a price per unit.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::ids::ItemId;

/// Unit in which an item's quantity is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    /// Whole or fractional units
    #[default]
    #[serde(alias = "unidad")]
    Unit,
    /// Length in meters
    #[serde(alias = "metro")]
    Meter,
}

impl Measure {
    /// Parse a measure from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "unit" | "units" | "u" | "unidad" => Some(Self::Unit),
            "meter" | "meters" | "m" | "metro" => Some(Self::Meter),
            _ => None,
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "unit"),
            Self::Meter => write!(f, "m"),
        }
    }
}

/// An income line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier within the items collection
    #[serde(default)]
    pub id: ItemId,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Price per unit (or per meter)
    #[serde(default)]
    pub price_per_unit: Amount,

    /// Quantity, may be fractional
    #[serde(default)]
    pub quantity: Amount,

    /// How the quantity is measured
    #[serde(default)]
    pub measure: Measure,
}

impl Item {
    /// Default description for a freshly added item
    pub const DEFAULT_DESCRIPTION: &'static str = "Item";

    /// Create a new item with the given values
    pub fn new(
        description: impl Into<String>,
        price_per_unit: impl Into<Amount>,
        quantity: impl Into<Amount>,
        measure: Measure,
    ) -> Self {
        Self {
            id: ItemId::new(),
            description: description.into(),
            price_per_unit: price_per_unit.into(),
            quantity: quantity.into(),
            measure,
        }
    }

    /// Copy of this item under a freshly generated ID
    pub fn with_fresh_id(&self) -> Self {
        Self {
            id: ItemId::new(),
            ..self.clone()
        }
    }
}

impl Default for Item {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DESCRIPTION, 0.0, 1.0, Measure::Unit)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {} x {})",
            self.description, self.quantity, self.measure, self.price_per_unit
        )
    }
}
