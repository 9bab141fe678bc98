//! Provider Utilities
//!
//! Shared utilities used by provider implementations.

mod http_response;
mod http_settings;
mod json;

pub use http_response::HttpResponseUtils;
pub use http_settings::HttpSettings;
pub use json::{JsonExt, f32_vector};
