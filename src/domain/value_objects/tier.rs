//! Tier and sync level value objects
//!
//! Every catalog item belongs to a [`Tier`]; the configured [`SyncLevel`]
//! decides which tiers take part in a sync.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selection tier of a catalog item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Always synced
    Essential,
    /// Synced only at the `full` level
    Optional,
}

/// Configured sync level (`--level`)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SyncLevel {
    /// Essential items only (default)
    #[default]
    Essential,
    /// Essential and optional items
    Full,
}

impl SyncLevel {
    /// Whether items of `tier` take part at this level
    pub fn includes(self, tier: Tier) -> bool {
        match (self, tier) {
            (_, Tier::Essential) => true,
            (SyncLevel::Full, Tier::Optional) => true,
            (SyncLevel::Essential, Tier::Optional) => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SyncLevel::Essential => "essential",
            SyncLevel::Full => "full",
        }
    }

    /// Lenient parse used for environment overrides
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "essential" => Some(SyncLevel::Essential),
            "full" => Some(SyncLevel::Full),
            _ => None,
        }
    }
}

impl fmt::Display for SyncLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
