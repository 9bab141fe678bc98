//! # Relay - Provider Implementations
//!
//! Concrete clients for the provider ports defined in `relay-domain`. Every
//! provider submits a factory to the linkme slices declared in
//! `relay-application`, so linking this crate is enough to make them
//! resolvable by name.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Generation | `GenerationProvider` | OpenAI-compatible, Ollama, Null |
//! | Embedding | `EmbeddingProvider` | OpenAI, Ollama, Null |
//!
//! ## Usage
//!
//! ```ignore
//! use relay_application::ports::registry::{resolve_generation_provider, GenerationProviderConfig};
//! use relay_domain::value_objects::ProviderTier;
//!
//! let config = GenerationProviderConfig::new("local", "ollama", ProviderTier::Local);
//! let provider = resolve_generation_provider(&config)?;
//! ```

pub use relay_domain::error::{Error, Result};
pub use relay_domain::ports::providers::{EmbeddingProvider, GenerationProvider};

/// Provider-specific constants
pub mod constants;

/// Shared utilities for provider implementations
pub mod utils;

/// Generation provider implementations
pub mod generation;

/// Embedding provider implementations
pub mod embedding;
