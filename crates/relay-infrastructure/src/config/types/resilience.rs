//! Resilience configuration types

use std::time::Duration;

use relay_application::resilience::CircuitBreakerConfig;
use relay_domain::constants::{
    CIRCUIT_BREAKER_CALL_TIMEOUT_SECS, CIRCUIT_BREAKER_FAILURE_THRESHOLD,
    CIRCUIT_BREAKER_RESET_TIMEOUT_SECS, CIRCUIT_BREAKER_SUCCESS_THRESHOLD,
};
use serde::{Deserialize, Serialize};

/// Circuit breaker settings applied to every generation provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResilienceConfig {
    /// Consecutive failures that open a circuit
    pub failure_threshold: u32,

    /// Consecutive half-open successes that close it again
    pub success_threshold: u32,

    /// Deadline for one provider call in seconds
    pub call_timeout_secs: u64,

    /// Time an open circuit waits before admitting a probe, in seconds
    pub reset_timeout_secs: u64,

    /// Probes admitted concurrently while half-open (defaults to `success_threshold`)
    pub half_open_max_requests: Option<u32>,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            failure_threshold: CIRCUIT_BREAKER_FAILURE_THRESHOLD,
            success_threshold: CIRCUIT_BREAKER_SUCCESS_THRESHOLD,
            call_timeout_secs: CIRCUIT_BREAKER_CALL_TIMEOUT_SECS,
            reset_timeout_secs: CIRCUIT_BREAKER_RESET_TIMEOUT_SECS,
            half_open_max_requests: None,
        }
    }
}

impl ResilienceConfig {
    /// Breaker configuration for the application layer
    pub fn breaker_config(&self) -> CircuitBreakerConfig {
        let config = CircuitBreakerConfig::new(
            self.failure_threshold,
            self.success_threshold,
            Duration::from_secs(self.call_timeout_secs),
            Duration::from_secs(self.reset_timeout_secs),
        );
        match self.half_open_max_requests {
            Some(max) => config.with_half_open_max_requests(max),
            None => config,
        }
    }
}
