//! Storage layer for Subtrack
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation.

pub mod budget;
pub mod file_io;
pub mod init;
pub mod subscriptions;

pub use budget::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use subscriptions::SubscriptionRepository;

use crate::config::paths::SubtrackPaths;
use crate::error::SubtrackError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: SubtrackPaths,
    pub subscriptions: SubscriptionRepository,
    pub budget: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: SubtrackPaths) -> Result<Self, SubtrackError> {
        paths.ensure_directories()?;

        Ok(Self {
            subscriptions: SubscriptionRepository::new(paths.subscriptions_file()),
            budget: BudgetRepository::new(paths.budget_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &SubtrackPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), SubtrackError> {
        self.subscriptions.load()?;
        self.budget.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), SubtrackError> {
        self.subscriptions.save()?;
        self.budget.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SubtrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_save_all_and_load_all() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SubtrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let storage = Storage::new(paths.clone()).unwrap();
        storage.budget.set(Money::from_units(1500)).unwrap();
        storage.save_all().unwrap();

        let mut reloaded = Storage::new(paths).unwrap();
        reloaded.load_all().unwrap();
        assert_eq!(reloaded.budget.monthly_limit().unwrap(), Money::from_units(1500));
        assert_eq!(reloaded.subscriptions.count().unwrap(), 0);
    }
}
