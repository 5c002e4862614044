//! User settings for Subtrack
//!
//! Manages display preferences and the reminder window used by the upcoming
//! charges view.

use serde::{Deserialize, Serialize};

use super::paths::SubtrackPaths;
use crate::engine::DEFAULT_REMINDER_WINDOW_DAYS;
use crate::error::SubtrackError;
use crate::models::DEFAULT_CURRENCY;

/// User settings for Subtrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// How many days ahead the upcoming view looks
    #[serde(default = "default_reminder_window")]
    pub reminder_window_days: i64,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Currency code given to new subscriptions
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_reminder_window() -> i64 {
    DEFAULT_REMINDER_WINDOW_DAYS
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            reminder_window_days: default_reminder_window(),
            currency_symbol: default_currency_symbol(),
            default_currency: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SubtrackPaths) -> Result<Self, SubtrackError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SubtrackError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SubtrackError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            tracing::debug!(path = %settings_path.display(), "loaded settings");
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SubtrackPaths) -> Result<(), SubtrackError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SubtrackError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            SubtrackError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
