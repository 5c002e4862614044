//! Subscription repository for JSON storage
//!
//! Manages loading and saving subscriptions to subscriptions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::SubtrackError;
use crate::models::ids::ID_DISPLAY_PREFIX;
use crate::models::{Subscription, SubscriptionId};

use super::file_io::{read_json, write_json_atomic};

/// Shortest id prefix accepted by [`SubscriptionRepository::find`]
const MIN_ID_PREFIX: usize = 4;

/// Serializable subscription data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct SubscriptionData {
    subscriptions: Vec<Subscription>,
}

/// Repository for subscription persistence
pub struct SubscriptionRepository {
    path: PathBuf,
    data: RwLock<HashMap<SubscriptionId, Subscription>>,
}

impl SubscriptionRepository {
    /// Create a new subscription repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load subscriptions from disk
    pub fn load(&self) -> Result<(), SubtrackError> {
        let file_data: SubscriptionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            SubtrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for subscription in file_data.subscriptions {
            data.insert(subscription.id, subscription);
        }

        tracing::debug!(count = data.len(), "loaded subscriptions");
        Ok(())
    }

    /// Save subscriptions to disk
    pub fn save(&self) -> Result<(), SubtrackError> {
        let file_data = SubscriptionData {
            subscriptions: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a subscription by ID
    pub fn get(&self, id: SubscriptionId) -> Result<Option<Subscription>, SubtrackError> {
        let data = self.data.read().map_err(|e| {
            SubtrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all subscriptions, sorted by name
    pub fn get_all(&self) -> Result<Vec<Subscription>, SubtrackError> {
        let data = self.data.read().map_err(|e| {
            SubtrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut subscriptions: Vec<_> = data.values().cloned().collect();
        subscriptions.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(subscriptions)
    }

    /// Get active subscriptions only, sorted by name
    pub fn get_active(&self) -> Result<Vec<Subscription>, SubtrackError> {
        Ok(self.get_all()?.into_iter().filter(|s| s.active).collect())
    }

    /// Get a subscription by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Subscription>, SubtrackError> {
        let data = self.data.read().map_err(|e| {
            SubtrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let needle = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|s| s.name.to_lowercase() == needle)
            .cloned())
    }

    /// Find a subscription by full id, displayed id (`sub-1a2b3c4d`), id
    /// prefix or name
    ///
    /// An id prefix that matches more than one subscription is rejected.
    pub fn find(&self, identifier: &str) -> Result<Option<Subscription>, SubtrackError> {
        let identifier = identifier.trim();

        if let Ok(id) = SubscriptionId::parse(identifier) {
            if let Some(subscription) = self.get(id)? {
                return Ok(Some(subscription));
            }
        }

        let prefix = identifier
            .strip_prefix(ID_DISPLAY_PREFIX)
            .unwrap_or(identifier)
            .to_lowercase();

        if prefix.len() >= MIN_ID_PREFIX && prefix.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
            let data = self.data.read().map_err(|e| {
                SubtrackError::Storage(format!("Failed to acquire read lock: {}", e))
            })?;

            let matches: Vec<_> = data
                .values()
                .filter(|s| s.id.has_prefix(&prefix))
                .collect();

            match matches.as_slice() {
                [only] => return Ok(Some((*only).clone())),
                [] => {}
                _ => {
                    return Err(SubtrackError::Validation(format!(
                        "Identifier '{}' matches {} subscriptions",
                        identifier,
                        matches.len()
                    )))
                }
            }
        }

        self.get_by_name(identifier)
    }

    /// Insert or update a subscription
    pub fn upsert(&self, subscription: Subscription) -> Result<(), SubtrackError> {
        let mut data = self.data.write().map_err(|e| {
            SubtrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(subscription.id, subscription);
        Ok(())
    }

    /// Delete a subscription
    pub fn delete(&self, id: SubscriptionId) -> Result<bool, SubtrackError> {
        let mut data = self.data.write().map_err(|e| {
            SubtrackError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        Ok(data.remove(&id).is_some())
    }

    /// Count subscriptions
    pub fn count(&self) -> Result<usize, SubtrackError> {
        let data = self.data.read().map_err(|e| {
            SubtrackError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillingCycle, Category, Money};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, SubscriptionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("subscriptions.json");
        let repo = SubscriptionRepository::new(path);
        (temp_dir, repo)
    }

    fn subscription(name: &str) -> Subscription {
        Subscription::new(
            name,
            Money::from_units(390),
            BillingCycle::Monthly,
            Category::Streaming,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let sub = subscription("Netflix");
        let id = sub.id;
        repo.upsert(sub).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Netflix");
    }

    #[test]
    fn test_get_all_sorted_by_name() {
        let (_temp_dir, repo) = create_test_repo();
        repo.upsert(subscription("spotify")).unwrap();
        repo.upsert(subscription("Adobe")).unwrap();
        repo.upsert(subscription("Netflix")).unwrap();

        let names: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Adobe", "Netflix", "spotify"]);
    }

    #[test]
    fn test_get_active_skips_paused() {
        let (_temp_dir, repo) = create_test_repo();
        let mut paused = subscription("Paused");
        paused.pause();
        repo.upsert(paused).unwrap();
        repo.upsert(subscription("Running")).unwrap();

        let active = repo.get_active().unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Running");
    }

    #[test]
    fn test_find_by_name_and_id() {
        let (_temp_dir, repo) = create_test_repo();
        let sub = subscription("YouTube Premium");
        let id = sub.id;
        repo.upsert(sub).unwrap();

        let by_name = repo.find("youtube premium").unwrap().unwrap();
        assert_eq!(by_name.id, id);

        let by_full_id = repo.find(&id.as_uuid().to_string()).unwrap().unwrap();
        assert_eq!(by_full_id.id, id);

        let by_display = repo.find(&id.to_string()).unwrap().unwrap();
        assert_eq!(by_display.id, id);

        assert!(repo.find("Hulu").unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let sub = subscription("Netflix").with_notes("family plan");
        let id = sub.id;
        repo.upsert(sub).unwrap();
        repo.save().unwrap();

        let repo2 = SubscriptionRepository::new(temp_dir.path().join("subscriptions.json"));
        repo2.load().unwrap();

        let retrieved = repo2.get(id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Netflix");
        assert_eq!(retrieved.notes, "family plan");
        assert_eq!(retrieved.price, Money::from_units(390));
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let sub = subscription("Netflix");
        let id = sub.id;
        repo.upsert(sub).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.find("Netflix").unwrap().is_none());
    }
}
