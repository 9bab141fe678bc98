//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns for Relay: configuration, logging,
//! failover audit sinks, and the composition root that wires providers
//! into the routers.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Typed configuration and the figment loader |
//! | [`logging`] | tracing subscriber setup |
//! | [`audit`] | Failover audit sinks |
//! | [`di`] | Provider resolution and [`AppContext`] |
//! | [`error_ext`] | Context helpers for foreign errors |

pub mod audit;
pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

pub use config::{AppConfig, ConfigLoader};
pub use di::{AppContext, init_app};
pub use error_ext::ErrorContext;
pub use logging::init_logging;
