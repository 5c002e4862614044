//! Monthly budget model
//!
//! A single spending ceiling compared against the monthly-equivalent total of
//! all active subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// The user's monthly subscription budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    /// Ceiling for monthly-equivalent spend
    pub monthly_limit: Money,

    /// When the limit was last changed
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(monthly_limit: Money) -> Self {
        Self {
            monthly_limit,
            updated_at: Utc::now(),
        }
    }

    pub fn set_limit(&mut self, monthly_limit: Money) {
        self.monthly_limit = monthly_limit;
        self.updated_at = Utc::now();
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / month", self.monthly_limit)
    }
}
