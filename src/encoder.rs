//! Report encoding
//!
//! Turns a `WellnessSnapshot` into the versioned `welltrack.report.v1`
//! payload consumed by the surrounding application: a producer block for
//! provenance, the generation timestamp, per-habit entries, the wellness
//! block, and any correlations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::pipeline::WellnessSnapshot;
use crate::types::{Category, CorrelationDirection, CorrelationStrength};
use crate::{ENGINE_VERSION, PRODUCER_NAME};

/// Report schema version embedded in every payload
pub const REPORT_VERSION: &str = "welltrack.report.v1";

/// Who produced the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportProducer {
    pub name: String,
    pub version: String,
    pub instance_id: String,
}

/// Per-habit entry in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitEntry {
    pub category: Category,
    pub daily_target: u32,
    pub window_days: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub adherence_pct: f64,
}

/// Wellness block of the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellnessEntry {
    /// Weighted overall score, 0-100
    pub overall: f64,
    /// Rounded score for display
    pub display: u32,
    pub worst_component: Category,
}

/// One correlation insight in the report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationEntry {
    pub metric_a: Category,
    pub metric_b: Category,
    pub coefficient: f64,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
}

/// Complete report payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportPayload {
    pub report_version: String,
    pub producer: ReportProducer,
    /// When the report was generated (UTC, RFC 3339)
    pub generated_at_utc: String,
    /// The "today" the snapshot was computed against (YYYY-MM-DD)
    pub as_of: String,
    pub habits: Vec<HabitEntry>,
    pub wellness: WellnessEntry,
    pub correlations: Vec<CorrelationEntry>,
}

/// Encoder assembling report payloads
pub struct SnapshotEncoder {
    instance_id: String,
}

impl Default for SnapshotEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotEncoder {
    /// Create an encoder with a fresh instance id
    pub fn new() -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
        }
    }

    /// Build the report payload for a snapshot.
    ///
    /// `generated_at` comes from the caller's clock so report provenance
    /// stays as reproducible as the snapshot itself.
    pub fn encode(&self, snapshot: &WellnessSnapshot, generated_at: DateTime<Utc>) -> ReportPayload {
        let habits = snapshot
            .habits
            .iter()
            .map(|summary| HabitEntry {
                category: summary.category,
                daily_target: summary.daily_target,
                window_days: summary.window_days,
                current_streak: summary.streak.current_streak,
                longest_streak: summary.streak.longest_streak,
                adherence_pct: summary.adherence_pct,
            })
            .collect();

        let correlations = snapshot
            .correlations
            .iter()
            .map(|result| CorrelationEntry {
                metric_a: result.metric_a,
                metric_b: result.metric_b,
                coefficient: result.coefficient,
                strength: result.strength,
                direction: result.direction,
            })
            .collect();

        ReportPayload {
            report_version: REPORT_VERSION.to_string(),
            producer: ReportProducer {
                name: PRODUCER_NAME.to_string(),
                version: ENGINE_VERSION.to_string(),
                instance_id: self.instance_id.clone(),
            },
            generated_at_utc: generated_at.to_rfc3339(),
            as_of: snapshot.as_of.format("%Y-%m-%d").to_string(),
            habits,
            wellness: WellnessEntry {
                overall: snapshot.wellness.overall,
                display: snapshot.wellness.display_score(),
                worst_component: snapshot.wellness.worst_component,
            },
            correlations,
        }
    }

    /// Encode a snapshot straight to a JSON string.
    pub fn encode_to_json(
        &self,
        snapshot: &WellnessSnapshot,
        generated_at: DateTime<Utc>,
    ) -> Result<String, EngineError> {
        Ok(serde_json::to_string(&self.encode(snapshot, generated_at))?)
    }
}
