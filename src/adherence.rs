//! Rolling-window adherence calculation
//!
//! Adherence is the percentage of days within a rolling window on which a
//! habit's daily target was met. Bucketing is order-independent, so callers
//! may pass history in any order.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::error::EngineError;
use crate::types::ActivityRecord;

/// Fraction of the window `[today - window_days + 1, today]` on which at
/// least `daily_target` entries were logged, as a 0-100 percentage.
///
/// A window or target of zero is a caller bug and raises; an empty history
/// is expected and yields 0.0. Records outside the window, including
/// future-dated ones, are ignored.
pub fn adherence(
    records: &[ActivityRecord],
    window_days: u32,
    daily_target: u32,
    today: NaiveDate,
) -> Result<f64, EngineError> {
    if window_days == 0 {
        return Err(EngineError::InvalidWindow(window_days));
    }
    if daily_target == 0 {
        return Err(EngineError::InvalidTarget(daily_target));
    }

    let window_start = today - Duration::days(i64::from(window_days) - 1);

    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for record in records {
        let day = record.day();
        if day < window_start || day > today {
            continue;
        }
        *counts.entry(day).or_insert(0) += 1;
    }

    let complete = counts.values().filter(|&&count| count >= daily_target).count();
    Ok(100.0 * complete as f64 / f64::from(window_days))
}
