//! Export module for Subtrack
//!
//! Provides data export in multiple formats:
//! - CSV: subscriptions in a spreadsheet-compatible layout the importer reads back
//! - JSON: machine-readable full export with schema versioning
//! - YAML: human-readable full export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_subscriptions_csv, write_subscriptions_csv};
pub use json::{export_full_json, import_from_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::{export_full_yaml, import_from_yaml};
