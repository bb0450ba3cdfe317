//! Ledger display settings
//!
//! Settings travel inside the ledger document (and therefore inside exports)
//! rather than in a separate config file.

use serde::{Deserialize, Serialize};

use crate::models::Amount;

/// Pesos per dollar used when no rate has been configured
pub const DEFAULT_EXCHANGE_RATE: f64 = 350.0;

/// Display settings stored with the ledger
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// ARS per USD, used to show dollar equivalents
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: Amount,

    /// Whether totals are also shown in USD
    #[serde(default, rename = "showUSD")]
    pub show_usd: bool,
}

fn default_exchange_rate() -> Amount {
    Amount::new(DEFAULT_EXCHANGE_RATE)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exchange_rate: default_exchange_rate(),
            show_usd: false,
        }
    }
}

impl Settings {
    /// The rate to convert with, if USD display is on and the rate is usable
    pub fn usd_rate(&self) -> Option<Amount> {
        (self.show_usd && self.exchange_rate.is_positive()).then_some(self.exchange_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.exchange_rate.value(), 350.0);
        assert!(!settings.show_usd);
        assert!(settings.usd_rate().is_none());
    }

    #[test]
    fn test_usd_rate_requires_positive_rate() {
        let mut settings = Settings {
            exchange_rate: Amount::from(1000.0),
            show_usd: true,
        };
        assert_eq!(settings.usd_rate(), Some(Amount::from(1000.0)));

        settings.exchange_rate = Amount::zero();
        assert!(settings.usd_rate().is_none());
    }

    #[test]
    fn test_serde_names_and_defaults() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["exchangeRate"], 350.0);
        assert_eq!(json["showUSD"], false);

        let partial: Settings = serde_json::from_str(r#"{"showUSD": true}"#).unwrap();
        assert!(partial.show_usd);
        assert_eq!(partial.exchange_rate.value(), 350.0);
    }
}
