//! Wall-clock seam. The engine never reads the system time directly, so
//! streak and challenge logic stays testable with a fixed clock.

use chrono::{DateTime, NaiveDate, Utc};

pub trait Clock {
    /// Current instant, used for achievement unlock timestamps.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day, used for streaks and the daily challenge.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
