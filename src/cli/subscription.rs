//! Subscription CLI commands
//!
//! Implements CLI commands for subscription management.

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_subscription_details, format_subscription_list};
use crate::engine::parse_start_date;
use crate::error::{SubtrackError, SubtrackResult};
use crate::models::{BillingCycle, Category, Money};
use crate::services::{NewSubscription, SubscriptionService, SubscriptionUpdate};
use crate::storage::Storage;

/// Subscription subcommands
#[derive(Subcommand)]
pub enum SubscriptionCommands {
    /// Add a new subscription
    Add {
        /// Subscription name
        name: String,
        /// Price per billing cycle (e.g., "390" or "182.50")
        price: String,
        /// Billing cycle (monthly, quarterly, yearly)
        #[arg(short = 'y', long, default_value = "monthly")]
        cycle: String,
        /// Category (e.g., streaming, software, music)
        #[arg(short, long, default_value = "other")]
        category: String,
        /// Currency code (defaults to the configured currency)
        #[arg(long)]
        currency: Option<String>,
        /// First billing date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        start: Option<String>,
        /// Free-form notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List subscriptions
    List {
        /// Include paused subscriptions
        #[arg(short, long)]
        all: bool,
    },
    /// Show subscription details
    Show {
        /// Subscription name or ID
        subscription: String,
    },
    /// Edit a subscription
    Edit {
        /// Subscription name or ID
        subscription: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New price
        #[arg(short, long)]
        price: Option<String>,
        /// New billing cycle
        #[arg(short = 'y', long)]
        cycle: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New currency code
        #[arg(long)]
        currency: Option<String>,
        /// New first billing date
        #[arg(short, long)]
        start: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// Delete a subscription
    #[command(alias = "rm")]
    Remove {
        /// Subscription name or ID
        subscription: String,
    },
    /// Pause a subscription so it no longer counts toward totals
    Pause {
        /// Subscription name or ID
        subscription: String,
    },
    /// Resume a paused subscription
    Resume {
        /// Subscription name or ID
        subscription: String,
    },
}

fn parse_price(price: &str) -> SubtrackResult<Money> {
    Money::parse(price).map_err(|e| SubtrackError::Validation(format!("Invalid price: {}", e)))
}

/// Handle a subscription command
pub fn handle_subscription_command(
    storage: &Storage,
    settings: &Settings,
    as_of: NaiveDate,
    cmd: SubscriptionCommands,
) -> SubtrackResult<()> {
    let service = SubscriptionService::new(storage).with_default_currency(&settings.default_currency);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        SubscriptionCommands::Add {
            name,
            price,
            cycle,
            category,
            currency,
            start,
            notes,
        } => {
            let start_date = match start {
                Some(s) => parse_start_date(&s)?,
                None => as_of,
            };

            let mut new = NewSubscription::new(
                name,
                parse_price(&price)?,
                cycle.parse::<BillingCycle>()?,
                Category::new(category.trim()),
                start_date,
            );
            new.currency = currency;
            new.notes = notes;

            let subscription = service.create(new)?;
            println!("Added subscription: {} ({})", subscription.name, subscription.id);
            print!("{}", format_subscription_details(&subscription, as_of, symbol));
        }

        SubscriptionCommands::List { all } => {
            let subscriptions = service.list(all)?;
            println!("{}", format_subscription_list(&subscriptions, as_of, symbol));
        }

        SubscriptionCommands::Show { subscription } => {
            let subscription = service.get_required(&subscription)?;
            print!("{}", format_subscription_details(&subscription, as_of, symbol));
        }

        SubscriptionCommands::Edit {
            subscription,
            name,
            price,
            cycle,
            category,
            currency,
            start,
            notes,
        } => {
            let update = SubscriptionUpdate {
                name,
                price: price.as_deref().map(parse_price).transpose()?,
                cycle: cycle.as_deref().map(str::parse::<BillingCycle>).transpose()?,
                category: category.as_deref().map(|c| Category::new(c.trim())),
                start_date: start.as_deref().map(parse_start_date).transpose()?,
                currency,
                notes,
            };

            if update.is_empty() {
                println!("Nothing to change. Use --help to see the editable fields.");
                return Ok(());
            }

            let updated = service.update(&subscription, update)?;
            println!("Updated subscription: {}", updated.name);
            print!("{}", format_subscription_details(&updated, as_of, symbol));
        }

        SubscriptionCommands::Remove { subscription } => {
            let removed = service.remove(&subscription)?;
            println!("Removed subscription: {}", removed.name);
        }

        SubscriptionCommands::Pause { subscription } => {
            let paused = service.pause(&subscription)?;
            println!("Paused subscription: {}", paused.name);
        }

        SubscriptionCommands::Resume { subscription } => {
            let resumed = service.resume(&subscription)?;
            println!("Resumed subscription: {}", resumed.name);
        }
    }

    Ok(())
}
