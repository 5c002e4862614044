//! Display formatting for terminal output
//!
//! Provides utilities for formatting subscriptions, category breakdowns and
//! budget status for terminal display.

pub mod budget;
pub mod category;
pub mod report;
pub mod subscription;

pub use budget::format_budget;
pub use category::format_category_shares;
pub use subscription::{format_subscription_details, format_subscription_list, format_upcoming};
