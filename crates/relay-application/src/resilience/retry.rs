//! Retry helper
//!
//! Retries a single provider attempt with exponential backoff. This runs
//! inside one provider call; moving on to another provider is the router's job.
//!
//! # Example
//!
//! ```ignore
//! let response = with_retry(
//!     || async { self.send(&body).await },
//!     3,
//!     BackoffPolicy::default(),
//!     is_transient,
//! )
//! .await?;
//! ```

use std::future::Future;
use std::time::Duration;

use relay_domain::error::{Error, Result};
use tracing::debug;

/// Exponential backoff parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl BackoffPolicy {
    /// Create a policy
    pub fn new(initial_delay: Duration, max_delay: Duration) -> Self {
        Self {
            initial_delay,
            max_delay,
        }
    }

    /// Delay before retry number `retry` (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.initial_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), Duration::from_secs(5))
    }
}

/// Run `operation` up to `max_attempts` times.
///
/// An error for which `retryable` returns `false` is returned immediately.
/// After the last attempt the last error is returned unchanged.
pub async fn with_retry<F, Fut, T, R>(
    mut operation: F,
    max_attempts: u32,
    policy: BackoffPolicy,
    retryable: R,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    R: Fn(&Error) -> bool,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < max_attempts && retryable(&e) => {
                let delay = policy.delay_for(attempt);
                debug!(
                    "Operation failed (attempt {}), retrying in {}ms: {}",
                    attempt,
                    delay.as_millis(),
                    e
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Whether an error is worth retrying against the same provider
///
/// Rate limiting, upstream 5xx and deadlines are transient; everything else
/// (bad request, auth failure, refused connection) is returned at once.
pub fn is_transient(error: &Error) -> bool {
    match error {
        Error::Timeout { .. } => true,
        Error::Provider {
            status: Some(status),
            ..
        } => *status == 429 || (500..600).contains(status),
        _ => false,
    }
}
