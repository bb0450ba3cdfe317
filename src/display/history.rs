//! History display formatting

use crate::models::Summary;

use super::currency::{format_amount, Currency};

/// Format months with their net balance, in the order given
pub fn format_month_list(months: &[(String, Summary)]) -> String {
    if months.is_empty() {
        return "No saved months.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {:>18}  {:>18}  {:>18}\n",
        "Month", "Subtotal", "Expenses", "Net balance"
    ));
    output.push_str(&format!("{:-<10}  {:->18}  {:->18}  {:->18}\n", "", "", "", ""));

    for (month, summary) in months {
        output.push_str(&format!(
            "{:<10}  {:>18}  {:>18}  {:>18}\n",
            month,
            format_amount(summary.subtotal(), Currency::Ars),
            format_amount(summary.total_expenses(), Currency::Ars),
            format_amount(summary.net_balance(), Currency::Ars),
        ));
    }

    output
}
