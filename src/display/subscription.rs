//! Subscription display formatting
//!
//! Formats subscriptions for terminal output in table and detail views.

use chrono::NaiveDate;

use super::report::truncate;
use crate::engine::{self, UpcomingCharge};
use crate::models::{Money, Subscription};

const NAME_WIDTH: usize = 24;

fn next_charge_label(subscription: &Subscription, as_of: NaiveDate) -> String {
    if !subscription.active {
        return "-".to_string();
    }
    engine::projector::project_subscription(subscription, as_of)
        .map(|p| format!("{} ({}d)", p.next_date, p.days_until))
        .unwrap_or_else(|_| "-".to_string())
}

/// Format a list of subscriptions as a table
pub fn format_subscription_list(subscriptions: &[Subscription], as_of: NaiveDate, symbol: &str) -> String {
    if subscriptions.is_empty() {
        return "No subscriptions found.".to_string();
    }

    let name_width = subscriptions
        .iter()
        .map(|s| s.name.chars().count().min(NAME_WIDTH))
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<14}  {:<9}  {:>12}  {:>12}  {:<18}  {}\n",
        "Name",
        "Category",
        "Cycle",
        "Price",
        "Monthly",
        "Next Charge",
        "Status",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<14}  {:-<9}  {:->12}  {:->12}  {:-<18}  {:-<6}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for subscription in subscriptions {
        output.push_str(&format!(
            "{:<name_width$}  {:<14}  {:<9}  {:>12}  {:>12}  {:<18}  {}\n",
            truncate(&subscription.name, name_width),
            truncate(subscription.category.as_str(), 14),
            subscription.cycle.as_str(),
            subscription.price.format_with_symbol(symbol),
            engine::normalizer::subscription_monthly_cost(subscription).format_with_symbol(symbol),
            next_charge_label(subscription, as_of),
            if subscription.active { "Active" } else { "Paused" },
            name_width = name_width,
        ));
    }

    let monthly = engine::total_monthly(subscriptions.iter().filter(|s| s.active));
    output.push_str(&format!(
        "\n{} subscription(s), {} per month for the active ones\n",
        subscriptions.len(),
        monthly.format_with_symbol(symbol)
    ));

    output
}

/// Format a single subscription's details
pub fn format_subscription_details(subscription: &Subscription, as_of: NaiveDate, symbol: &str) -> String {
    let monthly = engine::normalizer::subscription_monthly_cost(subscription);
    let yearly = engine::normalizer::subscription_yearly_cost(subscription);

    let mut output = String::new();
    output.push_str(&format!("Subscription: {}\n", subscription.name));
    output.push_str(&format!("  ID:             {}\n", subscription.id));
    output.push_str(&format!(
        "  Price:          {} {} {}\n",
        subscription.price.format_with_symbol(symbol),
        subscription.currency,
        subscription.cycle.as_str()
    ));
    output.push_str(&format!("  Monthly cost:   {}\n", monthly.format_with_symbol(symbol)));
    output.push_str(&format!("  Yearly cost:    {}\n", yearly.format_with_symbol(symbol)));
    output.push_str(&format!("  Category:       {}\n", subscription.category));
    output.push_str(&format!("  Started:        {}\n", subscription.start_date));
    output.push_str(&format!("  Next charge:    {}\n", next_charge_label(subscription, as_of)));
    output.push_str(&format!(
        "  Status:         {}\n",
        if subscription.active { "Active" } else { "Paused" }
    ));

    if !subscription.notes.is_empty() {
        output.push_str(&format!("  Notes:          {}\n", subscription.notes));
    }

    output
}

/// Format the charges due within the reminder window
pub fn format_upcoming(charges: &[UpcomingCharge], window_days: i64, symbol: &str) -> String {
    if charges.is_empty() {
        return format!("No charges in the next {} days.", window_days);
    }

    let mut output = String::new();
    output.push_str(&format!("Charges in the next {} days:\n", window_days));

    let mut total = Money::zero();
    for charge in charges {
        let when = match charge.days_until {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {} days", n),
        };
        output.push_str(&format!(
            "  {}  {:<24}  {:>12}  {}\n",
            charge.next_date,
            truncate(&charge.subscription.name, 24),
            charge.subscription.price.format_with_symbol(symbol),
            when
        ));
        total += charge.subscription.price;
    }
    output.push_str(&format!("  Total due: {}\n", total.format_with_symbol(symbol)));

    output
}
