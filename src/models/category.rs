//! Subscription category model
//!
//! Categories are a closed set of well-known tags plus `Custom`, which keeps
//! any other spelling verbatim. Matching is exact and case-sensitive, so
//! "Streaming" stays distinct from "streaming" and nothing is ever folded into
//! `Other` behind the user's back.
//!
//! Two categories are equal when their stored names are equal, so a `Custom`
//! built with a known name is the same category as the known variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A grouping tag for subscriptions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Streaming,
    Software,
    News,
    Gaming,
    Music,
    Education,
    Productivity,
    #[default]
    Other,
    /// Any tag outside the known set, stored as written
    Custom(String),
}

impl Category {
    /// The known categories in display order
    pub const KNOWN: [Category; 8] = [
        Self::Streaming,
        Self::Software,
        Self::News,
        Self::Gaming,
        Self::Music,
        Self::Education,
        Self::Productivity,
        Self::Other,
    ];

    /// Build a category from its stored name
    pub fn new(name: &str) -> Self {
        match name {
            "streaming" => Self::Streaming,
            "software" => Self::Software,
            "news" => Self::News,
            "gaming" => Self::Gaming,
            "music" => Self::Music,
            "education" => Self::Education,
            "productivity" => Self::Productivity,
            "other" => Self::Other,
            custom => Self::Custom(custom.to_string()),
        }
    }

    /// Stored name
    pub fn as_str(&self) -> &str {
        match self {
            Self::Streaming => "streaming",
            Self::Software => "software",
            Self::News => "news",
            Self::Gaming => "gaming",
            Self::Music => "music",
            Self::Education => "education",
            Self::Productivity => "productivity",
            Self::Other => "other",
            Self::Custom(name) => name,
        }
    }

    /// Whether the stored name is outside the known set
    pub fn is_custom(&self) -> bool {
        matches!(Self::new(self.as_str()), Self::Custom(_))
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

/// Shows the stored name, so distinct categories never print alike
impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}
