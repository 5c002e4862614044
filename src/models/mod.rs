//! Core data models for Subtrack
//!
//! This module contains the data structures the rest of the crate passes
//! around: subscriptions, their billing cycles and categories, money amounts,
//! and the monthly budget.

pub mod budget;
pub mod category;
pub mod cycle;
pub mod ids;
pub mod money;
pub mod subscription;

pub use budget::Budget;
pub use category::Category;
pub use cycle::BillingCycle;
pub use ids::SubscriptionId;
pub use money::{Money, MoneyParseError};
pub use subscription::{Subscription, SubscriptionValidationError, DEFAULT_CURRENCY, MAX_PRICE};
