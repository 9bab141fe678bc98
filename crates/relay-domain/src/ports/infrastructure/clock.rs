//! Calendar Clock Port
//!
//! Daily quotas roll over on calendar-date change. The usage tracker asks
//! this port for "today" so the boundary can be driven in tests.

use chrono::{Local, NaiveDate};

/// Source of the current calendar date
pub trait Clock: Send + Sync {
    /// Today's date in the tracker's reference timezone
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the host's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
