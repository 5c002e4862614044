//! Subscription model
//!
//! A recurring payment: what it costs per billing cycle, when it was first
//! charged, and how it is categorized.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::cycle::BillingCycle;
use super::ids::SubscriptionId;
use super::money::Money;

/// Currency recorded when none is given
pub const DEFAULT_CURRENCY: &str = "TWD";

/// Largest price accepted for one billing cycle
pub const MAX_PRICE: i64 = 1_000_000_000;

/// A recurring charge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    /// Unique identifier
    pub id: SubscriptionId,

    /// Display name (e.g., "Netflix")
    pub name: String,

    /// Amount charged once per cycle
    pub price: Money,

    /// Currency code, carried through unconverted
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Billing cycle
    pub cycle: BillingCycle,

    /// Grouping tag
    #[serde(default)]
    pub category: Category,

    /// Date of the first charge; later charges fall on the same day of month
    pub start_date: NaiveDate,

    /// Whether the subscription is currently being billed
    #[serde(default = "default_active")]
    pub active: bool,

    /// Free-form notes
    #[serde(default)]
    pub notes: String,

    /// When the subscription was created
    pub created_at: DateTime<Utc>,

    /// When the subscription was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_active() -> bool {
    true
}

impl Subscription {
    /// Create a new active subscription
    pub fn new(
        name: impl Into<String>,
        price: Money,
        cycle: BillingCycle,
        category: Category,
        start_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: SubscriptionId::new(),
            name: name.into(),
            price,
            currency: default_currency(),
            cycle,
            category,
            start_date,
            active: true,
            notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the currency code on construction
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set notes on construction
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    pub fn set_price(&mut self, price: Money) {
        self.price = price;
        self.updated_at = Utc::now();
    }

    pub fn set_cycle(&mut self, cycle: BillingCycle) {
        self.cycle = cycle;
        self.updated_at = Utc::now();
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
        self.updated_at = Utc::now();
    }

    pub fn set_start_date(&mut self, start_date: NaiveDate) {
        self.start_date = start_date;
        self.updated_at = Utc::now();
    }

    /// Stop billing without deleting the record
    pub fn pause(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }

    /// Resume billing
    pub fn resume(&mut self) {
        self.active = true;
        self.updated_at = Utc::now();
    }

    /// Validate the subscription
    pub fn validate(&self) -> Result<(), SubscriptionValidationError> {
        if self.name.trim().is_empty() {
            return Err(SubscriptionValidationError::EmptyName);
        }

        if self.price.is_negative() {
            return Err(SubscriptionValidationError::NegativePrice);
        }

        if self.price > Money::from_units(MAX_PRICE) {
            return Err(SubscriptionValidationError::PriceTooLarge);
        }

        if self.currency.trim().is_empty() {
            return Err(SubscriptionValidationError::EmptyCurrency);
        }

        if self.category.as_str().trim().is_empty() {
            return Err(SubscriptionValidationError::EmptyCategory);
        }

        Ok(())
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.name, self.price, self.cycle)
    }
}

/// Validation errors for subscriptions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionValidationError {
    EmptyName,
    NegativePrice,
    PriceTooLarge,
    EmptyCurrency,
    EmptyCategory,
}

impl fmt::Display for SubscriptionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Subscription name cannot be empty"),
            Self::NegativePrice => write!(f, "Subscription price cannot be negative"),
            Self::PriceTooLarge => write!(
                f,
                "Subscription price cannot exceed {}",
                Money::from_units(MAX_PRICE)
            ),
            Self::EmptyCurrency => write!(f, "Currency code cannot be empty"),
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
        }
    }
}

impl std::error::Error for SubscriptionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn netflix() -> Subscription {
        Subscription::new(
            "Netflix",
            Money::from_units(390),
            BillingCycle::Monthly,
            Category::Streaming,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        )
    }

    #[test]
    fn test_new_subscription() {
        let sub = netflix();
        assert_eq!(sub.name, "Netflix");
        assert_eq!(sub.currency, DEFAULT_CURRENCY);
        assert!(sub.active);
        assert!(sub.notes.is_empty());
    }

    #[test]
    fn test_pause_and_resume() {
        let mut sub = netflix();
        sub.pause();
        assert!(!sub.active);
        sub.resume();
        assert!(sub.active);
    }

    #[test]
    fn test_validation() {
        assert!(netflix().validate().is_ok());

        let mut unnamed = netflix();
        unnamed.name = "   ".into();
        assert_eq!(unnamed.validate(), Err(SubscriptionValidationError::EmptyName));

        let mut negative = netflix();
        negative.price = Money::from_units(-1);
        assert_eq!(
            negative.validate(),
            Err(SubscriptionValidationError::NegativePrice)
        );

        let mut huge = netflix();
        huge.price = Money::parse("1000000000000000000000000000").unwrap();
        assert_eq!(huge.validate(), Err(SubscriptionValidationError::PriceTooLarge));

        let mut at_limit = netflix();
        at_limit.price = Money::from_units(MAX_PRICE);
        assert!(at_limit.validate().is_ok());

        let free = Subscription::new(
            "Free tier",
            Money::zero(),
            BillingCycle::Monthly,
            Category::Software,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        assert!(free.validate().is_ok());
    }

    #[test]
    fn test_deserialize_applies_defaults() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Spotify",
            "price": 149,
            "cycle": "monthly",
            "start_date": "2024-03-01",
            "created_at": "2024-03-01T00:00:00Z",
            "updated_at": "2024-03-01T00:00:00Z"
        }"#;

        let sub: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(sub.price, Money::from_units(149));
        assert_eq!(sub.currency, "TWD");
        assert_eq!(sub.category, Category::Other);
        assert!(sub.active);
    }

    #[test]
    fn test_deserialize_rejects_unknown_cycle() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "name": "Gym",
            "price": 900,
            "cycle": "weekly",
            "start_date": "2024-03-01",
            "created_at": "2024-03-01T00:00:00Z",
            "updated_at": "2024-03-01T00:00:00Z"
        }"#;

        let result: Result<Subscription, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
