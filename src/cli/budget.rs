//! Budget CLI commands
//!
//! Implements CLI commands for setting, showing and clearing the monthly
//! subscription budget.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_budget;
use crate::error::{SubtrackError, SubtrackResult};
use crate::models::Money;
use crate::services::BudgetService;
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly budget
    Set {
        /// Monthly ceiling (e.g., "2000" or "1500.50")
        amount: String,
    },
    /// Show spending against the budget
    Show,
    /// Remove the monthly budget
    Clear,
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, settings: &Settings, cmd: BudgetCommands) -> SubtrackResult<()> {
    let service = BudgetService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BudgetCommands::Set { amount } => {
            let limit = Money::parse(&amount)
                .map_err(|e| SubtrackError::Validation(format!("Invalid amount: {}", e)))?;
            let budget = service.set_limit(limit)?;

            println!(
                "Monthly budget set to {}",
                budget.monthly_limit.format_with_symbol(symbol)
            );
            print!("{}", format_budget(&service.evaluate()?, symbol));
        }

        BudgetCommands::Show => {
            print!("{}", format_budget(&service.evaluate()?, symbol));
        }

        BudgetCommands::Clear => {
            if service.clear()? {
                println!("Monthly budget cleared.");
            } else {
                println!("No monthly budget was set.");
            }
        }
    }

    Ok(())
}
