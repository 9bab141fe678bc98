//! Generation Provider Implementations
//!
//! | Provider | Type |
//! |----------|------|
//! | NullGenerationProvider | Testing |
//! | OllamaGenerationProvider | Local |
//! | OpenAIGenerationProvider | Cloud (any OpenAI-compatible endpoint) |

pub mod helpers;
pub mod null;
pub mod ollama;
pub mod openai;

pub use null::NullGenerationProvider;
pub use ollama::OllamaGenerationProvider;
pub use openai::OpenAIGenerationProvider;
