//! # Relay
//!
//! Routes text generation and embedding requests across tiered inference
//! providers (primary, fallback, local). Failed calls fail over to the next
//! provider, generation providers sit behind per-provider circuit breakers,
//! embedding providers are skipped after repeated failures, and a usage
//! tracker enforces daily and per-minute quotas.
//!
//! ## Example
//!
//! ```ignore
//! use relay::domain::value_objects::{ChatMessage, GenerateRequest};
//! use relay::infrastructure::{ConfigLoader, init_app};
//!
//! let context = init_app(ConfigLoader::new().load()?).await?;
//! let request = GenerateRequest::new("Be brief.").with_message(ChatMessage::user("Hello"));
//! let response = context.generation().generate(&request).await?;
//! println!("{} answered: {}", response.model_used, response.text);
//! ```
//!
//! ## Architecture
//!
//! - `domain` - value objects, errors, provider and audit ports
//! - `application` - routers, circuit breakers, usage tracking
//! - `infrastructure` - configuration, logging, audit sinks, bootstrap
//! - `providers` - null, Ollama and OpenAI-compatible clients
//! - `cli` - the `relay` command line

/// Domain layer - core types and ports
pub mod domain {
    pub use relay_domain::*;
}

/// Application layer - routing core
pub mod application {
    pub use relay_application::*;
}

/// Infrastructure layer - config, logging, bootstrap
pub mod infrastructure {
    pub use relay_infrastructure::*;
}

/// Provider implementations
pub mod providers {
    pub use relay_providers::*;
}

pub mod cli;
