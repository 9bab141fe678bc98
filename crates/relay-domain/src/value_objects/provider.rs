//! Provider identity value objects

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Priority class of a generation provider
///
/// Declaration order is evaluation order: every `Primary` provider is tried
/// before any `Fallback`, and `Local` providers come last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderTier {
    /// Preferred hosted providers
    Primary,
    /// Hosted providers used when every primary failed
    Fallback,
    /// Self-hosted providers of last resort
    Local,
}

impl ProviderTier {
    /// Lowercase name used in configuration and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Fallback => "fallback",
            Self::Local => "local",
        }
    }
}

impl fmt::Display for ProviderTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "primary" => Ok(Self::Primary),
            "fallback" => Ok(Self::Fallback),
            "local" => Ok(Self::Local),
            other => Err(Error::invalid_argument(format!(
                "Unknown provider tier '{other}'. Use primary, fallback, or local"
            ))),
        }
    }
}

/// Result of probing one provider's availability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderHealthReport {
    /// Provider name
    pub name: String,
    /// Provider tier (embedding providers report `local` unless configured otherwise)
    pub tier: ProviderTier,
    /// Outcome of the provider's own availability check
    pub available: bool,
}
