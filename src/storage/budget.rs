//! Budget repository for JSON storage
//!
//! Holds the single optional monthly budget in budget.json

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SubtrackError;
use crate::models::{Budget, Money};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    #[serde(default)]
    budget: Option<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    budget: RwLock<Option<Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            budget: RwLock::new(None),
        }
    }

    /// Load the budget from disk
    pub fn load(&self) -> Result<(), SubtrackError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut budget = self
            .budget
            .write()
            .map_err(|e| SubtrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *budget = file_data.budget;
        Ok(())
    }

    /// Save the budget to disk
    pub fn save(&self) -> Result<(), SubtrackError> {
        let file_data = BudgetData {
            budget: self.get()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get the current budget, if one is set
    pub fn get(&self) -> Result<Option<Budget>, SubtrackError> {
        let budget = self
            .budget
            .read()
            .map_err(|e| SubtrackError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(budget.clone())
    }

    /// The monthly ceiling, or zero when no budget is set
    pub fn monthly_limit(&self) -> Result<Money, SubtrackError> {
        Ok(self
            .get()?
            .map(|b| b.monthly_limit)
            .unwrap_or_else(Money::zero))
    }

    /// Set the monthly ceiling, keeping the existing record if there is one
    pub fn set(&self, monthly_limit: Money) -> Result<Budget, SubtrackError> {
        let mut budget = self
            .budget
            .write()
            .map_err(|e| SubtrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let updated = match budget.take() {
            Some(mut existing) => {
                existing.set_limit(monthly_limit);
                existing
            }
            None => Budget::new(monthly_limit),
        };

        *budget = Some(updated.clone());
        Ok(updated)
    }

    /// Remove the budget. Returns whether one was set.
    pub fn clear(&self) -> Result<bool, SubtrackError> {
        let mut budget = self
            .budget
            .write()
            .map_err(|e| SubtrackError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(budget.take().is_some())
    }
}
