//! Time source seam.
//!
//! Production code injects [`SystemClock`]; tests inject [`FixedClock`] so
//! "today" and export timestamps are deterministic.

use chrono::{DateTime, Local, NaiveDate, Utc};

pub trait Clock {
    /// Current calendar date in the user's local time zone.
    fn today(&self) -> NaiveDate;
    /// Current instant, used for export timestamps.
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant; `today` is that instant's UTC date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0.date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
