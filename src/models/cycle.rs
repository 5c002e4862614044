//! Billing cycle model
//!
//! The recurrence period of a charge. The set is closed: anything other than
//! monthly, quarterly or yearly is rejected with `SubtrackError::InvalidCycle`
//! at the point where the value enters the system.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SubtrackError;

/// How often a subscription is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingCycle {
    /// Every supported cycle, shortest first
    pub const ALL: [BillingCycle; 3] = [Self::Monthly, Self::Quarterly, Self::Yearly];

    /// Number of calendar months between two charges
    pub const fn months(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Yearly => 12,
        }
    }

    /// Number of charges in one year
    pub const fn charges_per_year(&self) -> u32 {
        12 / self.months()
    }

    /// Machine name used in storage and on the command line
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }

    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for BillingCycle {
    type Err = SubtrackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(SubtrackError::InvalidCycle(s.to_string())),
        }
    }
}

impl TryFrom<String> for BillingCycle {
    type Error = SubtrackError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BillingCycle> for String {
    fn from(cycle: BillingCycle) -> Self {
        cycle.as_str().to_string()
    }
}
