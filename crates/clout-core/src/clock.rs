//! Simulation clock and calendar.
//!
//! The tick counter is the single source of truth for time. One tick is one
//! week; the calendar date of tick `N` is `start_date + 7 * N` days and is
//! always derived, never stored.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days in one tick.
const DAYS_PER_TICK: u64 = 7;

/// Errors that can occur during clock operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,

    /// The tick maps to a date chrono cannot represent.
    #[error("tick {tick} is outside the representable calendar")]
    DateOutOfRange {
        /// The offending tick.
        tick: u64,
    },
}

/// Weekly simulation clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimClock {
    /// Current tick (0 before the first `advance`).
    tick: u64,
    /// Calendar date of tick 0.
    start_date: NaiveDate,
}

impl SimClock {
    /// A clock at tick 0 starting on `start_date`.
    pub const fn new(start_date: NaiveDate) -> Self {
        Self {
            tick: 0,
            start_date,
        }
    }

    /// Restore a clock at an arbitrary tick.
    pub const fn from_parts(tick: u64, start_date: NaiveDate) -> Self {
        Self { tick, start_date }
    }

    /// Advance by one tick. Returns the new tick number.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        let next = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        self.date_for(next)?;
        self.tick = next;
        Ok(next)
    }

    /// Current tick.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Calendar date of tick 0.
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Calendar date of the current tick.
    pub fn date(&self) -> Result<NaiveDate, ClockError> {
        self.date_for(self.tick)
    }

    /// Calendar date of an arbitrary tick.
    pub fn date_for(&self, tick: u64) -> Result<NaiveDate, ClockError> {
        let days = tick
            .checked_mul(DAYS_PER_TICK)
            .ok_or(ClockError::DateOutOfRange { tick })?;
        self.start_date
            .checked_add_days(Days::new(days))
            .ok_or(ClockError::DateOutOfRange { tick })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn starts_at_zero() {
        let clock = SimClock::new(start());
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.date().unwrap(), start());
    }

    #[test]
    fn each_tick_is_one_week() {
        let mut clock = SimClock::new(start());
        assert_eq!(clock.advance().unwrap(), 1);
        assert_eq!(clock.advance().unwrap(), 2);
        assert_eq!(clock.date().unwrap(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn overflow_is_an_error() {
        let mut clock = SimClock::from_parts(u64::MAX, start());
        assert_eq!(clock.advance(), Err(ClockError::TickOverflow));
        assert_eq!(clock.tick(), u64::MAX);
    }

    #[test]
    fn far_future_is_out_of_range() {
        let clock = SimClock::new(start());
        assert!(clock.date_for(u64::MAX / 8).is_err());
    }
}
