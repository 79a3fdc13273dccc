//! Consecutive-day streak calculation
//!
//! A streak is a run of consecutive calendar days, ending today or yesterday,
//! on which a habit's daily target was met. All functions here are pure:
//! results depend only on the input records and the supplied "today".

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};

use crate::types::{ActivityRecord, StreakResult};

/// Reduce records to the set of calendar days on which at least
/// `daily_target` entries were logged.
///
/// Future-dated records (after `today`) are discarded so clock skew or bad
/// input can never inflate a streak.
pub fn complete_days(
    records: &[ActivityRecord],
    daily_target: u32,
    today: NaiveDate,
) -> BTreeSet<NaiveDate> {
    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for record in records {
        let day = record.day();
        if day > today {
            continue;
        }
        *counts.entry(day).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter(|&(_, count)| count >= daily_target)
        .map(|(day, _)| day)
        .collect()
}

/// Compute the streak from raw timestamps, treating every logged day as
/// satisfied (daily target of 1).
///
/// Duplicate same-day timestamps are deduplicated; future-dated timestamps
/// are discarded.
pub fn streak(dates: &[DateTime<Utc>], today: NaiveDate) -> StreakResult {
    let days: BTreeSet<NaiveDate> = dates
        .iter()
        .map(|ts| ts.date_naive())
        .filter(|&day| day <= today)
        .collect();
    streak_from_days(&days, today)
}

/// Compute the streak for a habit with a multi-entry daily target.
pub fn streak_for_records(
    records: &[ActivityRecord],
    daily_target: u32,
    today: NaiveDate,
) -> StreakResult {
    let days = complete_days(records, daily_target, today);
    streak_from_days(&days, today)
}

/// Compute current and longest streaks over a deduplicated day set.
///
/// The current streak is alive only if the most recent day is today or
/// yesterday; a gap of two or more days breaks it regardless of older
/// history. Callers must have removed days after `today` already.
pub fn streak_from_days(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> StreakResult {
    let most_recent = match days.iter().next_back() {
        Some(&day) => day,
        None => return StreakResult::default(),
    };

    let mut current = 0u32;
    if (today - most_recent).num_days() <= 1 {
        current = 1;
        let mut prev = most_recent;
        for &day in days.iter().rev().skip(1) {
            if (prev - day).num_days() == 1 {
                current += 1;
                prev = day;
            } else {
                break;
            }
        }
    }

    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for &day in days {
        run = match prev {
            Some(p) if (day - p).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }

    StreakResult {
        current_streak: current,
        longest_streak: longest,
    }
}
