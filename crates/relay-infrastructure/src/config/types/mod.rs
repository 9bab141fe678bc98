//! Configuration types module

pub mod app;
pub mod audit;
pub mod logging;
pub mod providers;
pub mod resilience;

// Re-export main types
pub use app::*;
