//! Provider Registry System
//!
//! Provider crates register factories into `linkme` distributed slices
//! declared here; configuration then picks a factory by name at startup.
//! Nothing in this crate knows the concrete providers.
//!
//! ## Registering a Provider (in relay-providers)
//!
//! ```ignore
//! use relay_application::ports::registry::{GenerationProviderEntry, GENERATION_PROVIDERS};
//!
//! #[linkme::distributed_slice(GENERATION_PROVIDERS)]
//! static OLLAMA_PROVIDER: GenerationProviderEntry = GenerationProviderEntry {
//!     name: "ollama",
//!     description: "Ollama local generation provider",
//!     factory: ollama_factory,
//! };
//! ```
//!
//! The binary must link the provider crate (an `extern crate` or any `use`)
//! or its entries are dropped by the linker.

pub mod embedding;
pub mod entry;
pub mod generation;

pub use entry::{ProviderEntry, ProviderFactory};

pub use embedding::{
    EMBEDDING_PROVIDERS, EmbeddingProviderConfig, EmbeddingProviderEntry, list_embedding_providers,
    resolve_embedding_provider,
};
pub use generation::{
    GENERATION_PROVIDERS, GenerationProviderConfig, GenerationProviderEntry,
    list_generation_providers, resolve_generation_provider,
};
