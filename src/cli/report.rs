//! Report CLI commands
//!
//! Dashboard, category breakdown and upcoming charges.

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::display::{format_category_shares, format_upcoming};
use crate::engine;
use crate::error::{SubtrackError, SubtrackResult};
use crate::reports::DashboardReport;
use crate::storage::Storage;

/// Output format for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    Text,
    Json,
    Csv,
}

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Show the spending dashboard
    #[command(alias = "dashboard")]
    Summary {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: SummaryFormat,
    },
    /// Show monthly spend per category
    Categories,
    /// Show charges due soon
    Upcoming {
        /// Days to look ahead (defaults to the configured reminder window)
        #[arg(short, long)]
        days: Option<i64>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    as_of: NaiveDate,
    cmd: ReportCommands,
) -> SubtrackResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Summary { format } => {
            let report = DashboardReport::from_storage(storage, as_of, settings.reminder_window_days)?;
            match format {
                SummaryFormat::Text => print!("{}", report.format_terminal(symbol)),
                SummaryFormat::Json => {
                    let json = serde_json::to_string_pretty(&report)?;
                    println!("{}", json);
                }
                SummaryFormat::Csv => {
                    let stdout = std::io::stdout();
                    let mut handle = stdout.lock();
                    report.export_csv(&mut handle)?;
                }
            }
        }

        ReportCommands::Categories => {
            let active = storage.subscriptions.get_active()?;
            println!("{}", format_category_shares(&engine::aggregate(&active), symbol));
        }

        ReportCommands::Upcoming { days } => {
            let window = days.unwrap_or(settings.reminder_window_days);
            if window < 0 {
                return Err(SubtrackError::Validation(
                    "Days to look ahead cannot be negative".into(),
                ));
            }

            let active = storage.subscriptions.get_active()?;
            let upcoming = engine::select_upcoming(&active, as_of, window)?;
            println!("{}", format_upcoming(&upcoming, window, symbol).trim_end());
        }
    }

    Ok(())
}
