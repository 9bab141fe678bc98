//! Domain Value Objects
//!
//! Immutable value objects that represent concepts in the domain
//! without identity. Value objects are defined by their attributes
//! and can be compared for equality.
//!
//! ## Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`GenerateRequest`] | System instruction, messages and sampling controls |
//! | [`GenerateResponse`] | Generated text attributed to a provider |
//! | [`Embedding`] | Vector representation of text |
//! | [`FailoverEvent`] | Audit record of one provider-to-provider fallback |
//! | [`UsageStats`] | Daily request/token counters for a provider |
//! | [`ProviderTier`] | Priority class deciding evaluation order |

/// Semantic embedding value objects
pub mod embedding;
/// Failover audit value objects
pub mod failover;
/// Text generation value objects
pub mod generation;
/// Provider identity value objects
pub mod provider;
/// Usage accounting value objects
pub mod usage;

// Re-export commonly used value objects
pub use embedding::Embedding;
pub use failover::{FailoverEvent, FailureReason, RoutingOperation};
pub use generation::{ChatMessage, GenerateRequest, GenerateResponse, MessageRole};
pub use provider::{ProviderHealthReport, ProviderTier};
pub use usage::{QuotaDecision, UsageStats};
