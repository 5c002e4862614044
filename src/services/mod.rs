//! Service layer for Subtrack
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, duplicate detection and persistence.

pub mod budget;
pub mod import;
pub mod subscription;

pub use budget::BudgetService;
pub use import::{ImportResult, ImportService};
pub use subscription::{NewSubscription, SubscriptionService, SubscriptionUpdate};
