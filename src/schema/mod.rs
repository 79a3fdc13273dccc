//! Wire schema for logged habit events
//!
//! Defines `habit.log_event.v1`, the source-agnostic input format the engine
//! accepts from the surrounding application, plus batch parsing/validation.

mod adapter;
mod log_event;

pub use adapter::{InvalidEvent, LogEventAdapter};
pub use log_event::{LogEvent, LogSource, ValidationError, SCHEMA_VERSION};
