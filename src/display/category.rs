//! Category breakdown formatting

use super::report::{format_bar, format_percentage, truncate};
use crate::engine::CategoryShare;
use crate::models::Money;

/// Format per-category shares of the monthly total, largest first
pub fn format_category_shares(shares: &[CategoryShare], symbol: &str) -> String {
    if shares.is_empty() {
        return "No active subscriptions.".to_string();
    }

    let max = shares
        .iter()
        .map(|s| s.monthly_amount.to_f64())
        .fold(0.0_f64, f64::max);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<16} {:>5} {:>12} {:>7}  {}\n",
        "Category", "Subs", "Monthly", "Share", ""
    ));
    output.push_str(&format!("{}\n", "-".repeat(64)));

    for share in shares {
        output.push_str(&format!(
            "{:<16} {:>5} {:>12} {:>7}  {}\n",
            truncate(share.category.as_str(), 16),
            share.count,
            share.monthly_amount.format_with_symbol(symbol),
            format_percentage(share.percent_of_total),
            format_bar(share.monthly_amount.to_f64(), max, 20)
        ));
    }

    let total: Money = shares.iter().map(|s| s.monthly_amount).sum();
    output.push_str(&format!("{}\n", "-".repeat(64)));
    output.push_str(&format!(
        "{:<16} {:>5} {:>12}\n",
        "TOTAL",
        shares.iter().map(|s| s.count).sum::<usize>(),
        total.format_with_symbol(symbol)
    ));

    output
}
