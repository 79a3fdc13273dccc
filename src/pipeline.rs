//! Snapshot orchestration
//!
//! `HabitEngine` is the public entry point: configured once with habit
//! definitions and score weights, it derives a full wellness snapshot from
//! a point-in-time history slice. Every stage is pure; the history is never
//! mutated, so callers may share one snapshot across derived computations.

use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::adherence::adherence;
use crate::clock::Clock;
use crate::correlation::correlate;
use crate::error::EngineError;
use crate::streak::streak_for_records;
use crate::types::{
    ActivityRecord, Category, CorrelationResult, EvaluationWindow, HabitDefinition, HabitSummary,
};
use crate::wellness::{wellness_score, WeightConfig, WellnessScore};

/// Window for cross-category correlation series
pub const DEFAULT_CORRELATION_WINDOW_DAYS: u32 = 30;

/// Everything the engine derives from one history snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WellnessSnapshot {
    /// The "today" the snapshot was computed against
    pub as_of: NaiveDate,
    pub habits: Vec<HabitSummary>,
    pub wellness: WellnessScore,
    pub correlations: Vec<CorrelationResult>,
}

/// Stateless compute engine for habit signals
#[derive(Debug, Clone)]
pub struct HabitEngine {
    habits: Vec<HabitDefinition>,
    weights: WeightConfig,
    correlation_pairs: Vec<(Category, Category)>,
}

impl Default for HabitEngine {
    /// Product defaults: one habit per category at one entry per day over a
    /// weekly window, except the multi-dose habits (medication 2/day,
    /// water 3/day). Sleep-vs-mood and workout-vs-mood are the insight
    /// pairs surfaced by default.
    fn default() -> Self {
        let habits = Category::ALL
            .iter()
            .map(|&category| {
                let daily_target = match category {
                    Category::Medication => 2,
                    Category::Water => 3,
                    _ => 1,
                };
                HabitDefinition::new(category, daily_target, EvaluationWindow::Week)
            })
            .collect();

        Self {
            habits,
            weights: WeightConfig::default(),
            correlation_pairs: vec![
                (Category::Sleep, Category::Mood),
                (Category::Workout, Category::Mood),
            ],
        }
    }
}

impl HabitEngine {
    /// Create an engine with explicit habit definitions and weights.
    pub fn new(habits: Vec<HabitDefinition>, weights: WeightConfig) -> Result<Self, EngineError> {
        weights.validate()?;

        let mut seen: Vec<Category> = Vec::with_capacity(habits.len());
        for habit in &habits {
            if habit.daily_target == 0 {
                return Err(EngineError::InvalidTarget(habit.daily_target));
            }
            if seen.contains(&habit.category) {
                return Err(EngineError::DuplicateHabit(habit.category.as_str()));
            }
            seen.push(habit.category);
        }

        Ok(Self {
            habits,
            weights,
            correlation_pairs: Vec::new(),
        })
    }

    /// Replace the correlation pairs computed per snapshot.
    pub fn with_correlation_pairs(mut self, pairs: Vec<(Category, Category)>) -> Self {
        self.correlation_pairs = pairs;
        self
    }

    pub fn habits(&self) -> &[HabitDefinition] {
        &self.habits
    }

    /// Derive the full snapshot: per-habit streaks and adherence, the
    /// weighted wellness score, and the configured correlations.
    ///
    /// Categories with no history stay out of the component-score map and
    /// fall back to the neutral default inside the aggregator.
    pub fn snapshot(
        &self,
        history: &[ActivityRecord],
        clock: &dyn Clock,
    ) -> Result<WellnessSnapshot, EngineError> {
        let today = clock.today();

        let mut by_category: HashMap<Category, Vec<ActivityRecord>> = HashMap::new();
        for record in history {
            by_category.entry(record.category).or_default().push(*record);
        }

        let mut summaries = Vec::with_capacity(self.habits.len());
        let mut component_scores: HashMap<Category, f64> = HashMap::new();

        for habit in &self.habits {
            let records = by_category
                .get(&habit.category)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let window_days = habit.evaluation_window.days();

            let streak = streak_for_records(records, habit.daily_target, today);
            let adherence_pct = adherence(records, window_days, habit.daily_target, today)?;

            if !records.is_empty() {
                component_scores.insert(habit.category, adherence_pct);
            }

            summaries.push(HabitSummary {
                category: habit.category,
                daily_target: habit.daily_target,
                window_days,
                streak,
                adherence_pct,
            });
        }

        let wellness = wellness_score(&component_scores, &self.weights)?;

        let mut correlations = Vec::new();
        for &(metric_a, metric_b) in &self.correlation_pairs {
            if let Some(result) = correlate_categories(
                history,
                metric_a,
                metric_b,
                DEFAULT_CORRELATION_WINDOW_DAYS,
                today,
            )? {
                correlations.push(result);
            }
        }

        Ok(WellnessSnapshot {
            as_of: today,
            habits: summaries,
            wellness,
            correlations,
        })
    }
}

/// Correlate the day-aligned mean values of two categories.
///
/// Builds one sample per calendar day on which *both* categories carry a
/// numeric value inside the window, then runs the Pearson utility. Days
/// with multiple values are averaged first so a triple-logged day does not
/// dominate the series.
pub fn correlate_categories(
    history: &[ActivityRecord],
    metric_a: Category,
    metric_b: Category,
    window_days: u32,
    today: NaiveDate,
) -> Result<Option<CorrelationResult>, EngineError> {
    if window_days == 0 {
        return Err(EngineError::InvalidWindow(window_days));
    }
    let window_start = today - Duration::days(i64::from(window_days) - 1);

    let means_a = daily_means(history, metric_a, window_start, today);
    let means_b = daily_means(history, metric_b, window_start, today);

    let mut x = Vec::new();
    let mut y = Vec::new();
    for (day, value_a) in &means_a {
        if let Some(value_b) = means_b.get(day) {
            x.push(*value_a);
            y.push(*value_b);
        }
    }

    correlate(metric_a, metric_b, &x, &y)
}

fn daily_means(
    history: &[ActivityRecord],
    category: Category,
    window_start: NaiveDate,
    today: NaiveDate,
) -> BTreeMap<NaiveDate, f64> {
    let mut sums: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
    for record in history {
        if record.category != category {
            continue;
        }
        let day = record.day();
        if day < window_start || day > today {
            continue;
        }
        if let Some(value) = record.value {
            let entry = sums.entry(day).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(day, (sum, count))| (day, sum / f64::from(count)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::types::{CorrelationDirection, CorrelationStrength, StreakResult};
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock::at_date(today())
    }

    fn record(category: Category, days_ago: i64, hour: u32, value: Option<f64>) -> ActivityRecord {
        let at: DateTime<Utc> =
            Utc.with_ymd_and_hms(2024, 6, 15, hour, 0, 0).unwrap() - Duration::days(days_ago);
        ActivityRecord::new(at, category, value)
    }

    fn medication_engine() -> HabitEngine {
        HabitEngine::new(
            vec![HabitDefinition::new(
                Category::Medication,
                2,
                EvaluationWindow::Week,
            )],
            WeightConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_duplicate_habit_is_rejected() {
        let result = HabitEngine::new(
            vec![
                HabitDefinition::new(Category::Water, 3, EvaluationWindow::Week),
                HabitDefinition::new(Category::Water, 1, EvaluationWindow::Day),
            ],
            WeightConfig::default(),
        );
        assert!(matches!(result, Err(EngineError::DuplicateHabit("water"))));
    }

    #[test]
    fn test_zero_target_habit_is_rejected() {
        let result = HabitEngine::new(
            vec![HabitDefinition::new(Category::Water, 0, EvaluationWindow::Week)],
            WeightConfig::default(),
        );
        assert!(matches!(result, Err(EngineError::InvalidTarget(0))));
    }

    #[test]
    fn test_empty_history_snapshot_is_neutral() {
        let engine = HabitEngine::default();
        let snapshot = engine.snapshot(&[], &clock()).unwrap();

        assert_eq!(snapshot.as_of, today());
        assert_eq!(snapshot.habits.len(), Category::ALL.len());
        for habit in &snapshot.habits {
            assert_eq!(habit.streak, StreakResult::default());
            assert_eq!(habit.adherence_pct, 0.0);
        }
        // No tracked categories: everything defaults to the neutral score.
        assert!((snapshot.wellness.overall - 50.0).abs() < 1e-9);
        assert!(snapshot.correlations.is_empty());
    }

    #[test]
    fn test_medication_end_to_end_scenario() {
        // Morning and evening dose today and yesterday, nothing before.
        let history = vec![
            record(Category::Medication, 0, 8, None),
            record(Category::Medication, 0, 20, None),
            record(Category::Medication, 1, 8, None),
            record(Category::Medication, 1, 20, None),
        ];
        let snapshot = medication_engine().snapshot(&history, &clock()).unwrap();

        let summary = snapshot.habits[0];
        assert_eq!(summary.streak.current_streak, 2);
        assert_eq!(summary.adherence_pct.round() as u32, 29); // 2/7
    }

    #[test]
    fn test_snapshot_does_not_mutate_history() {
        let history = vec![
            record(Category::Water, 0, 8, None),
            record(Category::Water, 1, 8, None),
        ];
        let before = history.clone();
        let engine = HabitEngine::default();
        engine.snapshot(&history, &clock()).unwrap();
        engine.snapshot(&history, &clock()).unwrap();
        assert_eq!(history, before);
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let history = vec![
            record(Category::Sleep, 0, 6, Some(7.5)),
            record(Category::Mood, 0, 21, Some(4.0)),
            record(Category::Water, 2, 9, None),
        ];
        let engine = HabitEngine::default();
        let first = engine.snapshot(&history, &clock()).unwrap();
        let second = engine.snapshot(&history, &clock()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tracked_category_feeds_wellness() {
        // Water logged 3x/day every day of the window: adherence 100.
        let mut history = Vec::new();
        for day in 0..7 {
            for hour in [8, 12, 18] {
                history.push(record(Category::Water, day, hour, None));
            }
        }
        let engine = HabitEngine::default();
        let snapshot = engine.snapshot(&history, &clock()).unwrap();

        // Six untracked categories at neutral 50, water at 100 with weight 0.15.
        let expected = 0.15 * 100.0 + 0.85 * 50.0;
        assert!((snapshot.wellness.overall - expected).abs() < 1e-9);
        assert_eq!(snapshot.wellness.worst_component, Category::Water);
    }

    #[test]
    fn test_correlate_categories_aligned_days() {
        // Sleep hours and next-evening mood move together over five days.
        let sleep = [6.0, 7.0, 8.0, 5.0, 9.0];
        let mood = [3.0, 3.5, 4.0, 2.5, 4.5];
        let mut history = Vec::new();
        for (day, (&s, &m)) in sleep.iter().zip(mood.iter()).enumerate() {
            history.push(record(Category::Sleep, day as i64, 6, Some(s)));
            history.push(record(Category::Mood, day as i64, 21, Some(m)));
        }

        let result = correlate_categories(&history, Category::Sleep, Category::Mood, 30, today())
            .unwrap()
            .unwrap();
        assert!((result.coefficient - 1.0).abs() < 1e-9);
        assert_eq!(result.strength, CorrelationStrength::Strong);
        assert_eq!(result.direction, CorrelationDirection::Positive);
    }

    #[test]
    fn test_correlate_categories_requires_overlap() {
        // Values on disjoint days: no aligned samples, no signal.
        let history = vec![
            record(Category::Sleep, 0, 6, Some(7.0)),
            record(Category::Sleep, 2, 6, Some(8.0)),
            record(Category::Mood, 1, 21, Some(3.0)),
            record(Category::Mood, 3, 21, Some(4.0)),
        ];
        let result =
            correlate_categories(&history, Category::Sleep, Category::Mood, 30, today()).unwrap();
        assert_eq!(result, None);
    }

    #[test]
    fn test_correlate_categories_averages_duplicate_days() {
        // Mood logged twice on one day; the mean feeds the series.
        let mut history = vec![
            record(Category::Sleep, 0, 6, Some(8.0)),
            record(Category::Sleep, 1, 6, Some(7.0)),
            record(Category::Sleep, 2, 6, Some(6.0)),
            record(Category::Mood, 0, 9, Some(5.0)),
            record(Category::Mood, 0, 21, Some(3.0)),
            record(Category::Mood, 1, 21, Some(3.5)),
            record(Category::Mood, 2, 21, Some(3.0)),
        ];
        let with_duplicates =
            correlate_categories(&history, Category::Sleep, Category::Mood, 30, today()).unwrap();

        // Replace the duplicate pair with its mean and expect the same result.
        history.retain(|r| r.category != Category::Mood || r.day() != today());
        history.push(record(Category::Mood, 0, 12, Some(4.0)));
        let with_mean =
            correlate_categories(&history, Category::Sleep, Category::Mood, 30, today()).unwrap();

        assert_eq!(with_duplicates, with_mean);
    }

    #[test]
    fn test_snapshot_surfaces_configured_correlations() {
        let mut history = Vec::new();
        for day in 0..5 {
            history.push(record(Category::Sleep, day, 6, Some(6.0 + day as f64)));
            history.push(record(Category::Mood, day, 21, Some(3.0 + day as f64 * 0.4)));
        }
        let engine = HabitEngine::default();
        let snapshot = engine.snapshot(&history, &clock()).unwrap();

        assert_eq!(snapshot.correlations.len(), 1);
        assert_eq!(snapshot.correlations[0].metric_a, Category::Sleep);
        assert_eq!(snapshot.correlations[0].metric_b, Category::Mood);
    }
}
