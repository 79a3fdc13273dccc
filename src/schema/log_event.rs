//! habit.log_event.v1 schema definition
//!
//! One logged habit event as it crosses the engine boundary. The schema is
//! versioned so stored logs remain parseable across engine releases, and
//! source metadata is preserved for provenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{ActivityRecord, Category};

/// Current schema version
pub const SCHEMA_VERSION: &str = "habit.log_event.v1";

/// Where an event was logged from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSource {
    /// Logging surface (e.g. "mobile", "web", "import")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app: Option<String>,
    /// Device identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

/// One logged habit event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEvent {
    /// Must be [`SCHEMA_VERSION`]
    pub schema_version: String,
    /// Caller-assigned event identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// When the event happened (UTC)
    pub recorded_at: DateTime<Utc>,
    /// Habit category
    pub category: Category,
    /// Optional numeric payload (mood rating, sleep hours, reading)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Provenance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<LogSource>,
}

/// Validation failure for a single event
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unsupported schema version: {0}")]
    UnsupportedVersion(String),

    #[error("Value is not a finite number: {0}")]
    NonFiniteValue(f64),
}

impl LogEvent {
    /// Check schema-level invariants.
    ///
    /// Future-dated timestamps pass validation; the computation layer
    /// neutralizes them so ingest never has to guess the caller's clock.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(ValidationError::UnsupportedVersion(
                self.schema_version.clone(),
            ));
        }
        if let Some(value) = self.value {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteValue(value));
            }
        }
        Ok(())
    }

    /// Strip wire metadata down to the engine's value type.
    pub fn to_record(&self) -> ActivityRecord {
        ActivityRecord::new(self.recorded_at, self.category, self.value)
    }
}
