//! Subtrack - subscription expense tracker
//!
//! This library provides the core functionality for the Subtrack command line
//! application: a pure billing-cycle and budget projection engine plus the
//! storage, services and reporting built around it.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (subscriptions, cycles, categories, money)
//! - `engine`: Cycle normalization, next-charge projection, category
//!   aggregation, budget evaluation and upcoming-charge selection
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer, including CSV import
//! - `reports`: Dashboard report
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the `subtrack` binary
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use subtrack::engine::{monthly_equivalent, next_occurrence};
//! use subtrack::models::{BillingCycle, Money};
//!
//! let monthly = monthly_equivalent(Money::from_units(1200), BillingCycle::Yearly);
//! assert_eq!(monthly, Money::from_units(100));
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
//! let as_of = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
//! let next = next_occurrence(start, BillingCycle::Monthly, as_of).unwrap();
//! assert_eq!(next, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SubtrackError, SubtrackResult};
