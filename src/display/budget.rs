//! Budget display formatting

use super::report::{format_bar, format_percentage};
use crate::engine::{BudgetEvaluation, BudgetTier};

const BAR_WIDTH: usize = 30;

/// Format a budget evaluation as a status block
pub fn format_budget(evaluation: &BudgetEvaluation, symbol: &str) -> String {
    let mut output = String::new();

    if !evaluation.is_configured() {
        output.push_str(&format!(
            "No monthly budget set. Current spend: {} per month.\n",
            evaluation.spend.format_with_symbol(symbol)
        ));
        output.push_str("Set one with: subtrack budget set <amount>\n");
        return output;
    }

    output.push_str(&format!(
        "Budget:     {} per month\n",
        evaluation.ceiling.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Spending:   {} per month\n",
        evaluation.spend.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "Usage:      {} {}\n",
        format_bar(evaluation.spend.to_f64(), evaluation.ceiling.to_f64(), BAR_WIDTH),
        format_percentage(evaluation.usage_percent)
    ));

    match evaluation.tier {
        BudgetTier::Over => output.push_str(&format!(
            "Status:     {} ({} over)\n",
            evaluation.tier.status_text(),
            evaluation.overage.format_with_symbol(symbol)
        )),
        _ => output.push_str(&format!(
            "Status:     {} ({} left)\n",
            evaluation.tier.status_text(),
            evaluation.remaining.format_with_symbol(symbol)
        )),
    }

    output
}
