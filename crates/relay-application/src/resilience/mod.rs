//! Resilience primitives
//!
//! - [`circuit_breaker`] - per-provider breaker actor and its keyed store
//! - [`retry`] - backoff retry for a single provider attempt

pub mod circuit_breaker;
pub mod retry;

pub use circuit_breaker::{
    CircuitBreaker, CircuitBreakerConfig, CircuitBreakerMetrics, CircuitBreakerRegistry,
    CircuitBreakerState,
};
pub use retry::{BackoffPolicy, is_transient, with_retry};
