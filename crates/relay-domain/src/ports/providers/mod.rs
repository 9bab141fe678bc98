//! External Service Provider Ports
//!
//! Ports for the inference backends Relay routes between.
//!
//! ## Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | [`GenerationProvider`] | Text generation backends (hosted or local) |
//! | [`EmbeddingProvider`] | Text embedding backends |

/// Embedding provider port
pub mod embedding;
/// Generation provider port
pub mod generation;

pub use embedding::EmbeddingProvider;
pub use generation::GenerationProvider;
