//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod report;
pub mod subscription;
pub mod transfer;

pub use budget::{handle_budget_command, BudgetCommands};
pub use report::{handle_report_command, ReportCommands};
pub use subscription::{handle_subscription_command, SubscriptionCommands};
pub use transfer::{handle_export_command, handle_import_command, ExportFormat};
