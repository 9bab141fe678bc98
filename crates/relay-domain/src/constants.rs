//! Domain layer constants
//!
//! Contains constants that are part of the routing domain and are used by
//! the application layer. Infrastructure-specific constants remain in
//! `relay_infrastructure::constants`.

// ============================================================================
// CIRCUIT BREAKER DEFAULTS (generation path)
// ============================================================================

/// Consecutive failures that trip a closed breaker
pub const CIRCUIT_BREAKER_FAILURE_THRESHOLD: u32 = 5;

/// Consecutive half-open successes that close the breaker again
pub const CIRCUIT_BREAKER_SUCCESS_THRESHOLD: u32 = 2;

/// Per-call deadline applied by the breaker, in seconds
pub const CIRCUIT_BREAKER_CALL_TIMEOUT_SECS: u64 = 30;

/// Time an open breaker waits before admitting a probe, in seconds
pub const CIRCUIT_BREAKER_RESET_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// EMBEDDING ROUTING
// ============================================================================

/// Consecutive failures after which an embedding provider is skipped for good
pub const EMBEDDING_FAILURE_THRESHOLD: u32 = 3;

/// Dimensionality reported when no embedding provider is usable
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 768;

/// Built-in embedding provider order used when none is configured
pub const DEFAULT_EMBEDDING_PROVIDER_ORDER: &str = "openai,ollama,null";

// ============================================================================
// USAGE TRACKING
// ============================================================================

/// Default daily request quota per tracked provider
pub const USAGE_DEFAULT_DAILY_REQUEST_LIMIT: u64 = 1_500;

/// Default daily token quota per tracked provider
pub const USAGE_DEFAULT_DAILY_TOKEN_LIMIT: u64 = 1_000_000;

/// Default shared requests-per-minute ceiling
pub const USAGE_DEFAULT_REQUESTS_PER_MINUTE: u64 = 15;

/// Fraction of a daily limit at which a warning is emitted
pub const USAGE_WARNING_RATIO: f64 = 0.8;

/// Length of the requests-per-minute window, in seconds
pub const USAGE_RPM_WINDOW_SECS: u64 = 60;

// ============================================================================
// FAILOVER EVENTS
// ============================================================================

/// `successful_provider` value recorded when no provider is left to try
pub const FAILOVER_NO_PROVIDER: &str = "none";
