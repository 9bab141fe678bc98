//! Application ports
//!
//! Provider traits live in `relay_domain::ports`; this module adds the
//! plugin registry that concrete providers submit themselves to.

pub mod registry;

pub use relay_domain::ports::{
    AuditSink, Clock, EmbeddingProvider, GenerationProvider, SystemClock,
};
