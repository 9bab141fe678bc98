//! Usage accounting value objects

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily counters for one tracked provider
///
/// Counters belong to the calendar day stored in `last_reset`; they are
/// zeroed when the tracker sees a different date, not after 24 elapsed hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    /// Requests accounted today
    pub request_count: u64,
    /// Tokens accounted today
    pub token_count: u64,
    /// Day the counters belong to
    pub last_reset: NaiveDate,
}

impl UsageStats {
    /// Fresh counters for `today`
    pub fn new(today: NaiveDate) -> Self {
        Self {
            request_count: 0,
            token_count: 0,
            last_reset: today,
        }
    }

    /// Zero the counters if `today` differs from the stored day.
    ///
    /// Returns `true` when a rollover happened.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        if self.last_reset == today {
            return false;
        }
        self.request_count = 0;
        self.token_count = 0;
        self.last_reset = today;
        true
    }
}

/// Outcome of a quota check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaDecision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Human-readable limit that was hit, when denied
    pub reason: Option<String>,
}

impl QuotaDecision {
    /// Request may proceed
    pub fn allow() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    /// Request is refused for `reason`
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
        }
    }
}
