//! Application Layer - Relay
//!
//! Routing core of Relay: ordered failover across inference providers,
//! per-provider circuit breakers, and the usage tracker that gates
//! generation requests.
//!
//! ## Architecture
//!
//! The application layer:
//! - Depends only on `relay-domain` ports; concrete providers and sinks are injected
//! - Declares the linkme slices that provider crates register into
//! - Has no dependencies on infrastructure or transport crates
//!
//! ## Modules
//!
//! - `resilience`: circuit breaker actor, breaker store, retry helper
//! - `registry`: tier-ordered generation providers and embedding order
//! - `usage`: daily and per-minute quota tracking
//! - `routing`: generation and embedding routers, failure classification
//! - `ports::registry`: provider factory registration

pub mod ports;
pub mod registry;
pub mod resilience;
pub mod routing;
pub mod usage;

pub use registry::{EmbeddingProviderOrder, EmbeddingProviderSet, ProviderRegistry};
pub use resilience::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerRegistry};
pub use routing::{EmbeddingRouter, GenerationRouter};
pub use usage::{UsageConfig, UsageTracker};
