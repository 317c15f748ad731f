//! Time source for borrow bookkeeping.
//!
//! All elapsed-day arithmetic goes through a [`Clock`] so that borrowing can
//! be simulated deterministically. Times are local wall-clock values.

use chrono::{Duration, Local, NaiveDateTime};
use thiserror::Error;

/// Source of the current local time
pub trait Clock {
    /// Current local date and time
    fn now(&self) -> NaiveDateTime;
}

/// Reads the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// The clock cannot move that far
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot move clock from {from} by {by}: out of range")]
pub struct ClockOutOfRange {
    pub from: NaiveDateTime,
    /// Requested shift, as given by the caller
    pub by: String,
}

/// A clock that only moves when told to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualClock {
    now: NaiveDateTime,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: NaiveDateTime) -> Self {
        Self { now: start }
    }

    /// Create a clock frozen at the current system time
    pub fn starting_now() -> Self {
        Self::new(SystemClock.now())
    }

    /// Move the clock forward by whole days.
    ///
    /// Leaves the clock untouched if the result would leave the calendar.
    pub fn advance_days(&mut self, days: i64) -> Result<(), ClockOutOfRange> {
        let by = Duration::try_days(days).ok_or_else(|| ClockOutOfRange {
            from: self.now,
            by: format!("{} days", days),
        })?;
        self.advance(by)
    }

    /// Move the clock by an arbitrary amount
    pub fn advance(&mut self, by: Duration) -> Result<(), ClockOutOfRange> {
        self.now = self
            .now
            .checked_add_signed(by)
            .ok_or_else(|| ClockOutOfRange {
                from: self.now,
                by: by.to_string(),
            })?;
        Ok(())
    }

    /// Jump to a specific time
    pub fn set(&mut self, now: NaiveDateTime) {
        self.now = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}
