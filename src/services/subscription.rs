//! Subscription service
//!
//! Provides business logic for subscription management: creation with
//! validation, lookup by id or name, edits, pausing and removal.

use chrono::NaiveDate;

use crate::error::{SubtrackError, SubtrackResult};
use crate::models::{BillingCycle, Category, Money, Subscription};
use crate::storage::Storage;

/// Fields of a subscription that is about to be created
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub name: String,
    pub price: Money,
    pub cycle: BillingCycle,
    pub category: Category,
    pub start_date: NaiveDate,
    /// Falls back to the configured default currency when `None`
    pub currency: Option<String>,
    pub notes: Option<String>,
}

impl NewSubscription {
    pub fn new(
        name: impl Into<String>,
        price: Money,
        cycle: BillingCycle,
        category: Category,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            price,
            cycle,
            category,
            start_date,
            currency: None,
            notes: None,
        }
    }
}

/// Changes to apply to an existing subscription; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct SubscriptionUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
    pub cycle: Option<BillingCycle>,
    pub category: Option<Category>,
    pub start_date: Option<NaiveDate>,
    pub currency: Option<String>,
    pub notes: Option<String>,
}

impl SubscriptionUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.cycle.is_none()
            && self.category.is_none()
            && self.start_date.is_none()
            && self.currency.is_none()
            && self.notes.is_none()
    }
}

/// Service for subscription management
pub struct SubscriptionService<'a> {
    storage: &'a Storage,
    default_currency: String,
}

impl<'a> SubscriptionService<'a> {
    /// Create a new subscription service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            default_currency: crate::models::DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Use a different currency for subscriptions created without one
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    /// Build a validated subscription without saving it
    pub fn build(&self, new: NewSubscription) -> SubtrackResult<Subscription> {
        let name = new.name.trim().to_string();
        let currency = new
            .currency
            .map(|c| c.trim().to_uppercase())
            .unwrap_or_else(|| self.default_currency.clone());

        let mut subscription = Subscription::new(name, new.price, new.cycle, new.category, new.start_date)
            .with_currency(currency);
        if let Some(notes) = new.notes {
            subscription = subscription.with_notes(notes);
        }

        subscription
            .validate()
            .map_err(|e| SubtrackError::Validation(e.to_string()))?;

        Ok(subscription)
    }

    /// Create and persist a new subscription
    pub fn create(&self, new: NewSubscription) -> SubtrackResult<Subscription> {
        let subscription = self.build(new)?;

        if self.storage.subscriptions.get_by_name(&subscription.name)?.is_some() {
            return Err(SubtrackError::duplicate_subscription(&subscription.name));
        }

        self.storage.subscriptions.upsert(subscription.clone())?;
        self.storage.subscriptions.save()?;

        tracing::info!(id = %subscription.id, name = %subscription.name, "created subscription");
        Ok(subscription)
    }

    /// Find a subscription by id or name
    pub fn find(&self, identifier: &str) -> SubtrackResult<Option<Subscription>> {
        self.storage.subscriptions.find(identifier)
    }

    /// Find a subscription by id or name, failing when there is none
    pub fn get_required(&self, identifier: &str) -> SubtrackResult<Subscription> {
        self.find(identifier)?
            .ok_or_else(|| SubtrackError::subscription_not_found(identifier))
    }

    /// List subscriptions sorted by name
    pub fn list(&self, include_paused: bool) -> SubtrackResult<Vec<Subscription>> {
        if include_paused {
            self.storage.subscriptions.get_all()
        } else {
            self.storage.subscriptions.get_active()
        }
    }

    /// Apply an update to an existing subscription
    pub fn update(&self, identifier: &str, update: SubscriptionUpdate) -> SubtrackResult<Subscription> {
        let mut subscription = self.get_required(identifier)?;

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if let Some(existing) = self.storage.subscriptions.get_by_name(&name)? {
                if existing.id != subscription.id {
                    return Err(SubtrackError::duplicate_subscription(name));
                }
            }
            subscription.set_name(name);
        }
        if let Some(price) = update.price {
            subscription.set_price(price);
        }
        if let Some(cycle) = update.cycle {
            subscription.set_cycle(cycle);
        }
        if let Some(category) = update.category {
            subscription.set_category(category);
        }
        if let Some(start_date) = update.start_date {
            subscription.set_start_date(start_date);
        }
        if let Some(currency) = update.currency {
            subscription.currency = currency.trim().to_uppercase();
        }
        if let Some(notes) = update.notes {
            subscription.notes = notes;
        }

        subscription
            .validate()
            .map_err(|e| SubtrackError::Validation(e.to_string()))?;

        self.storage.subscriptions.upsert(subscription.clone())?;
        self.storage.subscriptions.save()?;

        tracing::info!(id = %subscription.id, "updated subscription");
        Ok(subscription)
    }

    /// Stop counting a subscription in totals without deleting it
    pub fn pause(&self, identifier: &str) -> SubtrackResult<Subscription> {
        let mut subscription = self.get_required(identifier)?;
        if !subscription.active {
            return Err(SubtrackError::Validation(format!(
                "'{}' is already paused",
                subscription.name
            )));
        }

        subscription.pause();
        self.storage.subscriptions.upsert(subscription.clone())?;
        self.storage.subscriptions.save()?;
        Ok(subscription)
    }

    /// Count a paused subscription again
    pub fn resume(&self, identifier: &str) -> SubtrackResult<Subscription> {
        let mut subscription = self.get_required(identifier)?;
        if subscription.active {
            return Err(SubtrackError::Validation(format!(
                "'{}' is already active",
                subscription.name
            )));
        }

        subscription.resume();
        self.storage.subscriptions.upsert(subscription.clone())?;
        self.storage.subscriptions.save()?;
        Ok(subscription)
    }

    /// Delete a subscription for good
    pub fn remove(&self, identifier: &str) -> SubtrackResult<Subscription> {
        let subscription = self.get_required(identifier)?;

        self.storage.subscriptions.delete(subscription.id)?;
        self.storage.subscriptions.save()?;

        tracing::info!(id = %subscription.id, name = %subscription.name, "removed subscription");
        Ok(subscription)
    }

    /// Count subscriptions
    pub fn count(&self) -> SubtrackResult<usize> {
        self.storage.subscriptions.count()
    }
}
