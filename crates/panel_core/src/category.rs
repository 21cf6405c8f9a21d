use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Compliance check a record list belongs to. The tag doubles as the
/// `check` field sent to `/send-email`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Stale,
    Launches,
    NameDisc,
    Unauthorized,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Stale,
        Category::Launches,
        Category::NameDisc,
        Category::Unauthorized,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Stale => "stale",
            Category::Launches => "launches",
            Category::NameDisc => "name-disc",
            Category::Unauthorized => "unauthorized",
        }
    }

    /// Fixed identifier of the category's bulk-send control.
    pub fn bulk_control_id(self) -> &'static str {
        match self {
            Category::Stale => "stale-bulk-email",
            Category::Launches => "launches-bulk-email",
            Category::NameDisc => "name-disc-bulk-email",
            Category::Unauthorized => "unauthorized-bulk-email",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Stale => "Stale products",
            Category::Launches => "User launches",
            Category::NameDisc => "Name discrepancies",
            Category::Unauthorized => "Unauthorized users",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category tag {0:?}")]
pub struct CategoryParseError(pub String);

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == tag.trim())
            .ok_or_else(|| CategoryParseError(tag.to_string()))
    }
}
