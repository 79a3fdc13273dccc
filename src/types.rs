//! Core types for the WellTrack habit engine
//!
//! This module defines the value data the engine consumes and the derived
//! results it produces: activity records, habit definitions, streaks,
//! correlations, and the per-snapshot summaries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Tracked habit category
///
/// Closed set; dispatch over categories is exhaustiveness-checked rather
/// than string-matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Medication,
    Water,
    Workout,
    Sleep,
    Food,
    Mood,
    Biometrics,
}

impl Category {
    /// All categories, in display order
    pub const ALL: [Category; 7] = [
        Category::Medication,
        Category::Water,
        Category::Workout,
        Category::Sleep,
        Category::Food,
        Category::Mood,
        Category::Biometrics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Medication => "medication",
            Category::Water => "water",
            Category::Workout => "workout",
            Category::Sleep => "sleep",
            Category::Food => "food",
            Category::Mood => "mood",
            Category::Biometrics => "biometrics",
        }
    }
}

/// One logged event for a tracked habit
///
/// Records are append-only value data: the engine never mutates them, and
/// multiple records may share a calendar day (e.g. two medication doses).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// When the event was logged (UTC)
    pub recorded_at: DateTime<Utc>,
    /// Habit category this event belongs to
    pub category: Category,
    /// Optional numeric payload (mood rating, sleep hours, biometric reading)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl ActivityRecord {
    pub fn new(recorded_at: DateTime<Utc>, category: Category, value: Option<f64>) -> Self {
        Self {
            recorded_at,
            category,
            value,
        }
    }

    /// Calendar day this record falls on (time of day discarded)
    pub fn day(&self) -> NaiveDate {
        self.recorded_at.date_naive()
    }
}

/// Window over which a habit's adherence is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationWindow {
    Day,
    Week,
    Month,
}

impl EvaluationWindow {
    /// Window length in calendar days
    pub fn days(&self) -> u32 {
        match self {
            EvaluationWindow::Day => 1,
            EvaluationWindow::Week => 7,
            EvaluationWindow::Month => 30,
        }
    }
}

/// Static habit configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitDefinition {
    /// Category this habit tracks
    pub category: Category,
    /// Entries required per day for the day to count as complete
    pub daily_target: u32,
    /// Rolling window for adherence evaluation
    pub evaluation_window: EvaluationWindow,
}

impl HabitDefinition {
    pub fn new(category: Category, daily_target: u32, evaluation_window: EvaluationWindow) -> Self {
        Self {
            category,
            daily_target,
            evaluation_window,
        }
    }
}

/// Consecutive-day streak result
///
/// Derived on every query from the full record set; the engine keeps no
/// hidden memoization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    /// Consecutive complete days ending today or yesterday
    pub current_streak: u32,
    /// Longest run of consecutive complete days anywhere in history
    pub longest_streak: u32,
}

/// Strength classification for a correlation coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    Weak,
    Moderate,
    Strong,
}

/// Sign of a correlation coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

/// Pairwise linear relationship between two health metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub metric_a: Category,
    pub metric_b: Category,
    /// Pearson product-moment coefficient, in [-1, 1]
    pub coefficient: f64,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
}

/// Per-habit slice of a wellness snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabitSummary {
    pub category: Category,
    pub daily_target: u32,
    /// Adherence window length in days
    pub window_days: u32,
    pub streak: StreakResult,
    /// Fraction of window days the daily target was met, 0-100
    pub adherence_pct: f64,
}
