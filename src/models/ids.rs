//! Subscription identifier
//!
//! A UUID newtype so identifiers cannot be confused with arbitrary strings.
//! Users see the short form `sub-1a2b3c4d`; any unique hex prefix of the
//! UUID can be used to look a subscription up again.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Prefix of the short display form
pub const ID_DISPLAY_PREFIX: &str = "sub-";

/// Hex digits shown after the prefix
const SHORT_ID_LEN: usize = 8;

/// Unique identifier of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Parse a full UUID, with or without the display prefix
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        s.parse()
    }

    /// Whether the hyphenated UUID starts with `prefix` (lowercase hex)
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.0.hyphenated().to_string().starts_with(prefix)
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let simple = self.0.simple().to_string();
        write!(f, "{}{}", ID_DISPLAY_PREFIX, &simple[..SHORT_ID_LEN])
    }
}

impl FromStr for SubscriptionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix(ID_DISPLAY_PREFIX).unwrap_or(s);
        Uuid::parse_str(s).map(Self)
    }
}
