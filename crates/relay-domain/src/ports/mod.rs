//! Domain Port Interfaces
//!
//! Defines all boundary contracts between the routing core and external layers.
//! This follows the Dependency Inversion Principle:
//! - The routers depend on these traits only
//! - Provider clients, sinks and clocks implement them
//!
//! ## Organization
//!
//! - **infrastructure/** - Audit sink and calendar clock
//! - **providers/** - Generation and embedding backends

/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;

// Re-export commonly used port traits for convenience
pub use infrastructure::{AuditSink, Clock, SystemClock};
pub use providers::{EmbeddingProvider, GenerationProvider};
