use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use subtrack::cli::{
    handle_budget_command, handle_export_command, handle_import_command, handle_report_command,
    handle_subscription_command, BudgetCommands, ExportFormat, ReportCommands, SubscriptionCommands,
};
use subtrack::config::{paths::SubtrackPaths, settings::Settings};
use subtrack::engine::parse_start_date;
use subtrack::storage::{file_io::json_file_valid, init::initialize_storage, Storage};

/// Environment variable holding the log filter
const LOG_ENV: &str = "SUBTRACK_LOG";

#[derive(Parser)]
#[command(
    name = "subtrack",
    version,
    about = "Track recurring subscriptions and what they cost you",
    long_about = "Subtrack keeps a list of your recurring subscriptions, normalizes \
                  every billing cycle to a monthly cost, projects the next charge \
                  dates and checks the total against a monthly budget."
)]
struct Cli {
    /// Evaluate as if today were this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    as_of: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Subscription(SubscriptionCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Import subscriptions from CSV, or restore a JSON/YAML export
    Import {
        /// Path to the file
        file: PathBuf,
    },

    /// Export subscriptions to a file
    Export {
        /// Output file
        output: PathBuf,
        /// Output format (guessed from the extension when omitted)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,
    },

    /// Initialize the data directory
    Init,

    /// Show current configuration and paths
    Config,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn file_status(path: &Path) -> String {
    let status = if !path.exists() {
        "not created yet"
    } else if json_file_valid(path) {
        "ok"
    } else {
        "unreadable"
    };
    format!("{} ({})", path.display(), status)
}

fn resolve_as_of(as_of: Option<&str>) -> Result<NaiveDate> {
    match as_of {
        Some(s) => Ok(parse_start_date(s)?),
        None => Ok(Local::now().date_naive()),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = SubtrackPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let as_of = resolve_as_of(cli.as_of.as_deref())?;
    tracing::debug!(base_dir = %paths.base_dir().display(), %as_of, "starting");

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Some(Commands::Subscription(cmd)) => {
            handle_subscription_command(&storage, &settings, as_of, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            handle_report_command(&storage, &settings, as_of, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Some(Commands::Import { file }) => {
            handle_import_command(&storage, &settings, &file)?;
        }
        Some(Commands::Export { output, format }) => {
            handle_export_command(&storage, &output, format)?;
        }
        Some(Commands::Init) => {
            if initialize_storage(&paths)? {
                println!("Initialized Subtrack at: {}", paths.base_dir().display());
            } else {
                println!("Subtrack is already initialized at: {}", paths.base_dir().display());
            }
            println!();
            println!("Add your first subscription with:");
            println!("  subtrack add Netflix 390 --cycle monthly --category streaming");
        }
        Some(Commands::Config) => {
            println!("Subtrack Configuration");
            println!("======================");
            println!("Base directory:     {}", paths.base_dir().display());
            println!("Settings file:      {}", file_status(&paths.settings_file()));
            println!("Subscriptions file: {}", file_status(&paths.subscriptions_file()));
            println!("Budget file:        {}", file_status(&paths.budget_file()));
            println!();
            println!("Settings:");
            println!("  Reminder window:  {} days", settings.reminder_window_days);
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Default currency: {}", settings.default_currency);
            println!("  Date format:      {}", settings.date_format);
        }
        None => {
            println!("Subtrack - subscription expense tracker");
            println!();
            println!("Run 'subtrack --help' for usage information.");
            println!("Run 'subtrack summary' to see your dashboard.");
        }
    }

    Ok(())
}
