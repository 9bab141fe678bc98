//! Composition root and provider resolution

pub mod bootstrap;
pub mod resolver;

pub use bootstrap::{AppContext, init_app};
pub use resolver::{resolve_embedding_providers, resolve_generation_providers};
