//! Embedding Provider Implementations
//!
//! Converts text into dense vector embeddings.
//!
//! ## Available Providers
//!
//! | Provider | Type |
//! |----------|------|
//! | NullEmbeddingProvider | Testing |
//! | OllamaEmbeddingProvider | Local |
//! | OpenAIEmbeddingProvider | Cloud |

pub mod null;
pub mod ollama;
pub mod openai;

pub use null::NullEmbeddingProvider;
pub use ollama::OllamaEmbeddingProvider;
pub use openai::OpenAIEmbeddingProvider;
