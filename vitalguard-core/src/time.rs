//! Time management for assessments
//!
//! Provides clock abstraction so alert timestamps and patient ages come from
//! an injectable source:
//! - System clock (when std is available)
//! - Fixed clock (tests, replays of recorded sessions)

use chrono::{DateTime, NaiveDate};

/// Timestamp in milliseconds since the Unix epoch
pub type Timestamp = u64;

/// Source of time for the pipeline
///
/// Must be wall-clock time: it stamps alerts and anchors age computation.
pub trait TimeSource {
    /// Get current timestamp in milliseconds
    fn now(&self) -> Timestamp;
}

/// System time source (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTime;

#[cfg(feature = "std")]
impl TimeSource for SystemTime {
    fn now(&self) -> Timestamp {
        use std::time::{SystemTime as StdSystemTime, UNIX_EPOCH};

        StdSystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as Timestamp
    }
}

/// Fixed time source for testing
#[derive(Debug, Clone)]
pub struct FixedTime {
    timestamp: Timestamp,
}

impl FixedTime {
    /// Clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Clock frozen at midnight UTC of `date`
    pub fn at_date(date: NaiveDate) -> Self {
        let millis = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or_default();
        Self::new(millis.max(0) as Timestamp)
    }

    /// Move the clock to `timestamp`
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move the clock forward by `ms`
    pub fn advance(&mut self, ms: u64) {
        self.timestamp += ms;
    }
}

impl TimeSource for FixedTime {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

/// Calendar date (UTC) of a timestamp
///
/// `None` only for timestamps beyond chrono's representable range.
pub fn calendar_date(timestamp: Timestamp) -> Option<NaiveDate> {
    let millis = i64::try_from(timestamp).ok()?;
    DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_time_advances() {
        let mut time = FixedTime::new(1000);
        assert_eq!(time.now(), 1000);

        time.advance(500);
        assert_eq!(time.now(), 1500);
    }

    #[test]
    fn calendar_date_round_trips_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let clock = FixedTime::at_date(date);
        assert_eq!(calendar_date(clock.now()), Some(date));

        // One millisecond before midnight is still the previous day
        assert_eq!(
            calendar_date(clock.now() - 1),
            NaiveDate::from_ymd_opt(2024, 2, 28)
        );
    }

    #[test]
    fn epoch_is_1970() {
        assert_eq!(calendar_date(0), NaiveDate::from_ymd_opt(1970, 1, 1));
    }
}
