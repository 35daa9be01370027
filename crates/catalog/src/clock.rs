//! Injectable source of "now".
//!
//! The `new` quick filter and the schedule views both depend on the current
//! date, so anything time-sensitive takes a `&dyn Clock` instead of calling
//! `Utc::now()` directly.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Calendar year of `now()` in UTC
    fn current_year(&self) -> i32 {
        self.now().year()
    }

    /// UTC calendar date of `now()`
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for tests and reproducible runs
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
