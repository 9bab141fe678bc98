//! Infrastructure Service Ports

/// Failover audit sink port
pub mod audit;
/// Calendar clock port
pub mod clock;

pub use audit::AuditSink;
pub use clock::{Clock, SystemClock};
