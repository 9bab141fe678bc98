//! # Domain Layer
//!
//! Core types of Relay: the value objects exchanged with inference
//! providers, the failover audit record, usage counters, the error type,
//! and the ports that external collaborators implement.
//!
//! This crate has no runtime or transport dependencies; it is shared by
//! the application, provider and infrastructure crates.

/// Domain-level constants
pub mod constants;
/// Error type and result alias
pub mod error;
/// Port traits for external collaborators
pub mod ports;
/// Value objects
pub mod value_objects;

pub use error::{Error, Result};
