//! JSON Export functionality
//!
//! Exports all subscriptions and the budget to JSON format with schema
//! versioning. The same structure backs the YAML export and restore.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io::Write;

use crate::engine;
use crate::error::{SubtrackError, SubtrackResult};
use crate::models::{Budget, Money, Subscription};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full database export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// All subscriptions, active and paused
    pub subscriptions: Vec<Subscription>,

    /// The monthly budget, if one is set
    #[serde(default)]
    pub budget: Option<Budget>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Total number of subscriptions
    pub subscription_count: usize,

    /// Number of active subscriptions
    pub active_count: usize,

    /// Monthly-equivalent cost of the active subscriptions
    pub monthly_total: Money,

    /// Yearly cost of the active subscriptions
    pub yearly_total: Money,

    /// Earliest start date
    pub earliest_start: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> SubtrackResult<Self> {
        Ok(Self::new(storage.subscriptions.get_all()?, storage.budget.get()?))
    }

    /// Create an export from subscriptions and an optional budget
    pub fn new(subscriptions: Vec<Subscription>, budget: Option<Budget>) -> Self {
        let active = || subscriptions.iter().filter(|s| s.active);

        let metadata = ExportMetadata {
            subscription_count: subscriptions.len(),
            active_count: active().count(),
            monthly_total: engine::total_monthly(active()),
            yearly_total: engine::total_yearly(active()),
            earliest_start: subscriptions
                .iter()
                .map(|s| s.start_date)
                .min()
                .map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            subscriptions,
            budget,
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut ids = HashSet::new();
        for subscription in &self.subscriptions {
            if !ids.insert(subscription.id) {
                return Err(format!("Duplicate subscription id: {}", subscription.id));
            }
            subscription
                .validate()
                .map_err(|e| format!("Subscription '{}': {}", subscription.name, e))?;
        }

        if let Some(budget) = &self.budget {
            engine::validate_ceiling(budget.monthly_limit).map_err(|e| e.to_string())?;
        }

        if self.metadata.subscription_count != self.subscriptions.len() {
            return Err(format!(
                "Subscription count mismatch: metadata says {}, found {}",
                self.metadata.subscription_count,
                self.subscriptions.len()
            ));
        }

        Ok(())
    }

    /// Replace everything in storage with the contents of this export
    pub fn restore_into(&self, storage: &Storage) -> SubtrackResult<usize> {
        self.validate().map_err(SubtrackError::Import)?;

        for existing in storage.subscriptions.get_all()? {
            storage.subscriptions.delete(existing.id)?;
        }
        for subscription in &self.subscriptions {
            storage.subscriptions.upsert(subscription.clone())?;
        }

        match &self.budget {
            Some(budget) => {
                storage.budget.set(budget.monthly_limit)?;
            }
            None => {
                storage.budget.clear()?;
            }
        }

        storage.save_all()?;
        tracing::info!(count = self.subscriptions.len(), "restored export");
        Ok(self.subscriptions.len())
    }
}

/// Export the full database to JSON format
pub fn export_full_json<W: Write>(storage: &Storage, writer: &mut W, pretty: bool) -> SubtrackResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| SubtrackError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a JSON export
pub fn import_from_json(json_str: &str) -> SubtrackResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| SubtrackError::Import(e.to_string()))?;

    export.validate().map_err(SubtrackError::Import)?;

    Ok(export)
}
