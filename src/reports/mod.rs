//! Reports module for Subtrack
//!
//! Provides the dashboard snapshot built on top of the projection engine.

pub mod dashboard;

pub use dashboard::DashboardReport;
