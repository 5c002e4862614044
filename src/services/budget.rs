//! Budget service
//!
//! Keeps the monthly ceiling and evaluates active subscriptions against it.

use crate::engine::{self, BudgetEvaluation};
use crate::error::SubtrackResult;
use crate::models::{Budget, Money};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Set the monthly ceiling
    pub fn set_limit(&self, limit: Money) -> SubtrackResult<Budget> {
        engine::validate_ceiling(limit)?;

        let budget = self.storage.budget.set(limit)?;
        self.storage.budget.save()?;

        tracing::info!(limit = %limit, "set monthly budget");
        Ok(budget)
    }

    /// Remove the ceiling. Returns whether one was set.
    pub fn clear(&self) -> SubtrackResult<bool> {
        let cleared = self.storage.budget.clear()?;
        if cleared {
            self.storage.budget.save()?;
        }
        Ok(cleared)
    }

    /// The current budget, if any
    pub fn get(&self) -> SubtrackResult<Option<Budget>> {
        self.storage.budget.get()
    }

    /// Compare the monthly cost of active subscriptions with the ceiling
    pub fn evaluate(&self) -> SubtrackResult<BudgetEvaluation> {
        let active = self.storage.subscriptions.get_active()?;
        let spend = engine::total_monthly(&active);
        Ok(engine::evaluate(self.storage.budget.monthly_limit()?, spend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::SubtrackPaths;
    use crate::engine::BudgetTier;
    use crate::models::{BillingCycle, Category, Subscription};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = SubtrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add(storage: &Storage, name: &str, price: i64, cycle: BillingCycle, active: bool) {
        let mut sub = Subscription::new(
            name,
            Money::from_units(price),
            cycle,
            Category::Software,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        if !active {
            sub.pause();
        }
        storage.subscriptions.upsert(sub).unwrap();
    }

    #[test]
    fn test_set_limit_validates() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        assert!(service.set_limit(Money::zero()).unwrap_err().is_validation());
        assert!(service
            .set_limit(Money::from_units(1_000_001))
            .unwrap_err()
            .is_validation());

        let budget = service.set_limit(Money::from_units(2000)).unwrap();
        assert_eq!(budget.monthly_limit, Money::from_units(2000));
    }

    #[test]
    fn test_evaluate_ignores_paused() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        add(&storage, "Cloud", 1200, BillingCycle::Yearly, true);
        add(&storage, "Old", 900, BillingCycle::Monthly, false);
        service.set_limit(Money::from_units(120)).unwrap();

        let evaluation = service.evaluate().unwrap();
        assert_eq!(evaluation.spend, Money::from_units(100));
        assert_eq!(evaluation.tier, BudgetTier::Warning);
    }

    #[test]
    fn test_evaluate_without_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        add(&storage, "Cloud", 100, BillingCycle::Monthly, true);

        let evaluation = service.evaluate().unwrap();
        assert_eq!(evaluation.tier, BudgetTier::None);
        assert!(!service.clear().unwrap());
    }
}
