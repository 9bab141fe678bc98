//! Failover audit value objects

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::FAILOVER_NO_PROVIDER;

/// Classified cause of a provider failure
///
/// Used for logging and audit records only; routing treats every kind the
/// same way and moves on to the next provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FailureReason {
    /// The provider endpoint refused the connection
    ConnectionRefused,
    /// The call exceeded its deadline
    Timeout,
    /// The provider answered with HTTP 429 or equivalent
    RateLimited,
    /// The provider answered with a 5xx or equivalent
    ServerError,
    /// The provider's circuit breaker rejected the call without trying it
    CircuitOpen,
    /// Anything else, carrying the raw error message
    Other(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConnectionRefused => f.write_str("connection refused"),
            Self::Timeout => f.write_str("timeout"),
            Self::RateLimited => f.write_str("rate limited"),
            Self::ServerError => f.write_str("server error"),
            Self::CircuitOpen => f.write_str("circuit open"),
            Self::Other(message) => f.write_str(message),
        }
    }
}

/// Which router produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingOperation {
    /// Text generation
    Generation,
    /// Embedding generation
    Embedding,
}

/// Value Object: Failover Event
///
/// Immutable record of one provider-to-provider fallback within a single
/// request. `successful_provider` names the next provider in order, or
/// [`FAILOVER_NO_PROVIDER`] when the failed provider was the last one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailoverEvent {
    /// Provider whose attempt failed
    pub failed_provider: String,
    /// Provider tried next, or `"none"`
    pub successful_provider: String,
    /// Classified failure cause
    pub reason: FailureReason,
    /// Raw message of the underlying error
    pub error_message: String,
    /// Router that recorded the event
    pub operation: RoutingOperation,
    /// When the failure was observed
    pub occurred_at: DateTime<Utc>,
}

impl FailoverEvent {
    /// Record a failure of `failed_provider`, handing over to `next_provider`
    pub fn new(
        operation: RoutingOperation,
        failed_provider: impl Into<String>,
        next_provider: Option<&str>,
        reason: FailureReason,
        error_message: impl Into<String>,
    ) -> Self {
        Self {
            failed_provider: failed_provider.into(),
            successful_provider: next_provider.unwrap_or(FAILOVER_NO_PROVIDER).to_string(),
            reason,
            error_message: error_message.into(),
            operation,
            occurred_at: Utc::now(),
        }
    }

    /// Whether the failure exhausted the provider list
    pub fn is_terminal(&self) -> bool {
        self.successful_provider == FAILOVER_NO_PROVIDER
    }
}
