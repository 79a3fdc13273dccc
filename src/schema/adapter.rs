//! Batch parsing and validation of log events
//!
//! Accepts NDJSON (one event per line) and JSON-array inputs, reports
//! invalid events by index, and converts validated batches into the
//! engine's `ActivityRecord` value type.

use crate::error::EngineError;
use crate::schema::log_event::{LogEvent, ValidationError};
use crate::types::ActivityRecord;

/// One event that failed validation, with enough context to point at it
#[derive(Debug)]
pub struct InvalidEvent {
    /// Position in the input batch
    pub index: usize,
    /// Caller-assigned id, if the event carried one
    pub event_id: Option<String>,
    pub error: ValidationError,
}

/// Stateless parser/validator for event batches
pub struct LogEventAdapter;

impl LogEventAdapter {
    /// Parse newline-delimited JSON; blank lines are skipped.
    pub fn parse_ndjson(input: &str) -> Result<Vec<LogEvent>, EngineError> {
        let mut events = Vec::new();
        for (line_number, line) in input.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let event: LogEvent = serde_json::from_str(trimmed).map_err(|e| {
                EngineError::InvalidRecord(format!("line {}: {}", line_number + 1, e))
            })?;
            events.push(event);
        }
        Ok(events)
    }

    /// Parse a JSON array of events.
    pub fn parse_array(input: &str) -> Result<Vec<LogEvent>, EngineError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Validate every event, returning the failures with their indices.
    pub fn validate_events(events: &[LogEvent]) -> Vec<InvalidEvent> {
        events
            .iter()
            .enumerate()
            .filter_map(|(index, event)| {
                event.validate().err().map(|error| InvalidEvent {
                    index,
                    event_id: event.event_id.clone(),
                    error,
                })
            })
            .collect()
    }

    /// Validate and convert a batch to activity records.
    ///
    /// The first invalid event aborts the conversion; callers wanting a
    /// full report should run [`Self::validate_events`] instead.
    pub fn to_records(events: &[LogEvent]) -> Result<Vec<ActivityRecord>, EngineError> {
        let mut records = Vec::with_capacity(events.len());
        for (index, event) in events.iter().enumerate() {
            event
                .validate()
                .map_err(|e| EngineError::InvalidRecord(format!("event {}: {}", index, e)))?;
            records.push(event.to_record());
        }
        Ok(records)
    }
}
