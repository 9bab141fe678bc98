//! Infrastructure layer constants
//!
//! Contains constants that are part of the infrastructure implementation.
//! Routing defaults are defined in `relay_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "relay.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "relay";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "RELAY";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "RELAY_LOG";

/// Log file stem used when the configured path has none
pub const DEFAULT_LOG_FILE_STEM: &str = "relay";

// ============================================================================
// AUDIT CONSTANTS
// ============================================================================

/// Events kept by the in-memory audit sink
pub const AUDIT_MEMORY_DEFAULT_CAPACITY: usize = 1000;

/// Tracing target for failover events
pub const AUDIT_LOG_TARGET: &str = "relay::failover";
