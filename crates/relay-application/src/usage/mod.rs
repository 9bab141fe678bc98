//! Usage and quota accounting

pub mod config;
pub mod tracker;

pub use config::UsageConfig;
pub use tracker::UsageTracker;
