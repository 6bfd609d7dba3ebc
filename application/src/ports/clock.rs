//! Time source port

use chrono::{DateTime, NaiveDate, Utc};

/// Injected wall clock, so budget periods and timestamps are testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current UTC calendar day
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }

    /// Milliseconds since the Unix epoch
    fn now_millis(&self) -> u64 {
        u64::try_from(self.now().timestamp_millis()).unwrap_or(0)
    }
}

/// The real system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
