//! Injectable time source
//!
//! Every computation in the engine takes "today" from an explicit `Clock`
//! rather than reading wall-clock time inside the logic, so identical inputs
//! with the same clock always produce identical results.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Capability supplying the current time
pub trait Clock {
    /// Current instant (UTC)
    fn now_utc(&self) -> DateTime<Utc>;

    /// Current calendar day (UTC)
    fn today(&self) -> NaiveDate {
        self.now_utc().date_naive()
    }
}

/// Wall-clock time source for production use
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed time source for tests and replay
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Fix the clock at midnight of the given day
    pub fn at_date(date: NaiveDate) -> Self {
        Self {
            now: date.and_time(NaiveTime::MIN).and_utc(),
        }
    }
}

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let clock = FixedClock::at_date(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.now_utc().date_naive(), date);
    }

    #[test]
    fn test_fixed_clock_is_stable() {
        let clock = FixedClock::at_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(clock.now_utc(), clock.now_utc());
    }

    #[test]
    fn test_system_clock_today_matches_now() {
        let clock = SystemClock;
        assert_eq!(clock.today(), clock.now_utc().date_naive());
    }
}
