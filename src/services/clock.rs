//! Injectable clock for date-range resolution and report timestamps

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};

/// Source of "now" in local wall-clock time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Instant used for report metadata (`generatedAt`).
    ///
    /// The default reads the wall-clock time as UTC. Clocks that know their
    /// offset override it, as `SystemClock` does.
    fn now_utc(&self) -> DateTime<Utc> {
        self.now().and_utc()
    }
}

/// Reads the system clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant, for deterministic tests.
///
/// The wall-clock time doubles as the UTC instant, so `generatedAt` reads
/// the same on every machine regardless of its offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Fixed at noon on the given date
    pub fn at_date(date: NaiveDate) -> Self {
        Self(date.and_hms_opt(12, 0, 0).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
