//! HTTP client settings shared by the HTTP providers

use std::collections::HashMap;
use std::time::Duration;

use relay_application::resilience::BackoffPolicy;
use reqwest::Client;

use crate::constants::{
    DEFAULT_HTTP_MAX_ATTEMPTS, DEFAULT_HTTP_TIMEOUT_SECS, EXTRA_MAX_ATTEMPTS, EXTRA_TIMEOUT_SECS,
};

/// Timeout and retry settings for one provider instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpSettings {
    /// Per-request timeout
    pub timeout: Duration,
    /// Attempts per call, including the first
    pub max_attempts: u32,
    /// Backoff between attempts
    pub backoff: BackoffPolicy,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            max_attempts: DEFAULT_HTTP_MAX_ATTEMPTS,
            backoff: BackoffPolicy::default(),
        }
    }
}

impl HttpSettings {
    /// Read overrides from a provider's `extra` map
    pub fn from_extra(extra: &HashMap<String, String>) -> Result<Self, String> {
        let mut settings = Self::default();
        if let Some(raw) = extra.get(EXTRA_TIMEOUT_SECS) {
            let secs: u64 = raw
                .parse()
                .map_err(|_| format!("Invalid {EXTRA_TIMEOUT_SECS} '{raw}'"))?;
            settings.timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = extra.get(EXTRA_MAX_ATTEMPTS) {
            settings.max_attempts = raw
                .parse()
                .map_err(|_| format!("Invalid {EXTRA_MAX_ATTEMPTS} '{raw}'"))?;
        }
        Ok(settings)
    }

    /// Build a reqwest client with this timeout
    pub fn build_client(&self) -> Result<Client, String> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {e}"))
    }
}
