//! Currency formatting
//!
//! Amounts are shown in pesos in the Argentine style (`$ 1.234,56`) and,
//! when enabled, in dollars in the US style (`$1,234.56`).

use std::fmt;

use crate::models::Amount;

/// Display currency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    Ars,
    Usd,
}

impl Currency {
    /// ISO code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Ars => "ARS",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Turns an amount into a display string for a currency
pub trait Formatter {
    fn format(&self, amount: Amount, currency: Currency) -> String;
}

/// Locale-aware formatter: es-AR for pesos, en-US for dollars
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleFormatter;

struct Style {
    symbol: &'static str,
    thousands: char,
    decimal: char,
}

impl Style {
    fn of(currency: Currency) -> Self {
        match currency {
            Currency::Ars => Style {
                symbol: "$ ",
                thousands: '.',
                decimal: ',',
            },
            Currency::Usd => Style {
                symbol: "$",
                thousands: ',',
                decimal: '.',
            },
        }
    }
}

fn group_digits(mut whole: u64, separator: char) -> String {
    let mut groups = Vec::new();
    loop {
        if whole < 1000 {
            groups.push(whole.to_string());
            break;
        }
        groups.push(format!("{:03}", whole % 1000));
        whole /= 1000;
    }
    groups.reverse();
    groups.join(&separator.to_string())
}

impl Formatter for LocaleFormatter {
    fn format(&self, amount: Amount, currency: Currency) -> String {
        let style = Style::of(currency);
        let cents = (amount.value().abs() * 100.0).round() as u64;
        let sign = if amount.is_negative() && cents > 0 { "-" } else { "" };

        format!(
            "{}{}{}{}{:02}",
            sign,
            style.symbol,
            group_digits(cents / 100, style.thousands),
            style.decimal,
            cents % 100
        )
    }
}

/// Format with the default locale formatter
pub fn format_amount(amount: Amount, currency: Currency) -> String {
    LocaleFormatter.format(amount, currency)
}
