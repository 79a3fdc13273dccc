//! WellTrack Habit Engine - deterministic compute engine for habit signals
//!
//! The engine derives streaks, rolling-window adherence, pairwise metric
//! correlations, and a weighted wellness score from a user's activity log.
//! Every computation is a pure function of the input records and an
//! injected clock: same history plus same "today" always yields the same
//! result, and no input is ever mutated.
//!
//! ## Modules
//!
//! - **streak / adherence / correlation / wellness**: the core calculators
//! - **pipeline**: `HabitEngine`, deriving a full snapshot in one call
//! - **schema**: the `habit.log_event.v1` input format and batch ingestion
//! - **encoder**: the `welltrack.report.v1` output payload

pub mod adherence;
pub mod clock;
pub mod correlation;
pub mod encoder;
pub mod error;
pub mod pipeline;
pub mod schema;
pub mod streak;
pub mod types;
pub mod wellness;

pub use adherence::adherence;
pub use clock::{Clock, FixedClock, SystemClock};
pub use correlation::{correlate, pearson};
pub use encoder::{ReportPayload, SnapshotEncoder, REPORT_VERSION};
pub use error::EngineError;
pub use pipeline::{correlate_categories, HabitEngine, WellnessSnapshot};
pub use streak::{streak, streak_for_records};
pub use types::{
    ActivityRecord, Category, CorrelationDirection, CorrelationResult, CorrelationStrength,
    EvaluationWindow, HabitDefinition, HabitSummary, StreakResult,
};
pub use wellness::{wellness_score, WeightConfig, WellnessScore};

// Schema exports
pub use schema::{LogEvent, LogEventAdapter, SCHEMA_VERSION};

/// Engine version embedded in all report payloads
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name for report payloads
pub const PRODUCER_NAME: &str = "welltrack-engine";
