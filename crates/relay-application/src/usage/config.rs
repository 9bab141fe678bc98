//! Usage tracker configuration

use relay_domain::constants::{
    USAGE_DEFAULT_DAILY_REQUEST_LIMIT, USAGE_DEFAULT_DAILY_TOKEN_LIMIT,
    USAGE_DEFAULT_REQUESTS_PER_MINUTE, USAGE_WARNING_RATIO,
};
use serde::{Deserialize, Serialize};

/// Quota settings for the tracked provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UsageConfig {
    /// When false every request is allowed and nothing is counted
    pub enabled: bool,
    /// Provider whose free-tier quota is enforced (defaults to the first in tier order)
    pub tracked_provider: Option<String>,
    /// Requests allowed per calendar day
    pub daily_request_limit: u64,
    /// Tokens allowed per calendar day
    pub daily_token_limit: u64,
    /// Requests allowed per minute, shared across providers
    pub requests_per_minute: u64,
    /// Fraction of a daily limit that triggers a warning
    pub warning_ratio: f64,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tracked_provider: None,
            daily_request_limit: USAGE_DEFAULT_DAILY_REQUEST_LIMIT,
            daily_token_limit: USAGE_DEFAULT_DAILY_TOKEN_LIMIT,
            requests_per_minute: USAGE_DEFAULT_REQUESTS_PER_MINUTE,
            warning_ratio: USAGE_WARNING_RATIO,
        }
    }
}

impl UsageConfig {
    /// Configuration that never refuses a request
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}
