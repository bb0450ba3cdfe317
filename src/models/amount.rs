//! Amount type for quantities, prices and totals
//!
//! Ledger values are plain decimal numbers (half units and half days are
//! common), so `Amount` wraps an `f64`. The one guarantee it adds is that it
//! is always finite: anything that is not a usable number when read from a
//! document, or that overflows during arithmetic, collapses to zero.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

/// A finite decimal amount
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Default)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Create an amount, coercing non-finite input to zero
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value)
        } else {
            Self(0.0)
        }
    }

    /// Create a zero amount
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Get the raw value
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Check if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Check if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Check if the amount is negative
    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Parse user input leniently
    ///
    /// Accepts "10", "10.5", "  3 ", and the comma decimal separator "10,5".
    /// Anything else becomes zero, mirroring how the ledger treats bad input.
    pub fn parse_lenient(s: &str) -> Self {
        let s = s.trim().replace(',', ".");
        s.parse::<f64>().map(Self::new).unwrap_or_default()
    }

    /// Coerce an arbitrary JSON value to an amount
    ///
    /// Numbers pass through, numeric strings are parsed, booleans become 1/0
    /// and everything else is zero.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map(Self::new).unwrap_or_default(),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    Self::zero()
                } else {
                    trimmed.parse::<f64>().map(Self::new).unwrap_or_default()
                }
            }
            Value::Bool(true) => Self(1.0),
            _ => Self::zero(),
        }
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Self::new(value as f64)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract() == 0.0 {
            write!(f, "{:.0}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0 - other.0)
    }
}

impl Mul for Amount {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self::new(self.0 * other.0)
    }
}

/// Division by zero yields zero rather than infinity.
impl Div for Amount {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        if other.is_zero() {
            Self::zero()
        } else {
            Self::new(self.0 / other.0)
        }
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}
