//! Event Sink Implementations
//!
//! - JsonEventSink: NDJSON output for scripts/CI
//! - ConsoleEventSink lives in the binary's `ui` module

mod json;

pub use json::{event_to_json, JsonEventSink};
