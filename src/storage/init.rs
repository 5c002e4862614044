//! Storage initialization
//!
//! Handles first-run setup

use crate::config::paths::SubtrackPaths;
use crate::config::settings::Settings;
use crate::error::SubtrackError;

/// Initialize storage for a fresh installation
///
/// Creates the directory layout and writes default settings. Existing
/// settings are left alone. Returns whether anything was created.
pub fn initialize_storage(paths: &SubtrackPaths) -> Result<bool, SubtrackError> {
    paths.ensure_directories()?;

    if paths.is_initialized() {
        return Ok(false);
    }

    Settings::default().save(paths)?;
    tracing::info!(path = %paths.base_dir().display(), "initialized storage");
    Ok(true)
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &SubtrackPaths) -> bool {
    !paths.is_initialized()
}
