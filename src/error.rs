//! Error types for the WellTrack habit engine
//!
//! Only invalid input raises an error. Insufficient data (empty history,
//! short or constant correlation samples) is a valid "no signal yet" result
//! and is modeled as zero values or `None`, never as an error.

use thiserror::Error;

/// Errors that can occur during computation
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Window must cover at least one day (got {0})")]
    InvalidWindow(u32),

    #[error("Daily target must be at least 1 (got {0})")]
    InvalidTarget(u32),

    #[error("Series length mismatch: {left} vs {right}")]
    SeriesLengthMismatch { left: usize, right: usize },

    #[error("Non-finite sample at index {0}")]
    NonFiniteSample(usize),

    #[error("Invalid weight configuration: {0}")]
    InvalidWeights(String),

    #[error("Component score out of range for {category}: {value}")]
    ScoreOutOfRange { category: &'static str, value: f64 },

    #[error("Duplicate habit definition for {0}")]
    DuplicateHabit(&'static str),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Date parse error: {0}")]
    DateParseError(String),
}
