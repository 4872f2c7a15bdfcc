//! JSON Event Sink
//!
//! Outputs sync events as NDJSON for scripts and CI.

use crate::domain::ports::{SyncEvent, SyncEventSink};
use serde_json::{json, Value};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON representation of one event
pub fn event_to_json(event: &SyncEvent) -> Value {
    match event {
        SyncEvent::PhaseStarted { phase } => json!({
            "event": "phase_start",
            "phase": phase.as_str(),
        }),
        SyncEvent::Transport {
            operation,
            success,
            detail,
        } => json!({
            "event": "transport",
            "operation": operation,
            "success": success,
            "detail": detail,
        }),
        SyncEvent::MachineStarted {
            machine,
            hostname,
            timestamp,
        } => json!({
            "event": "machine_start",
            "machine": machine,
            "hostname": hostname,
            "timestamp": timestamp,
        }),
        SyncEvent::MachineSkipped { machine, reason } => json!({
            "event": "machine_skipped",
            "machine": machine,
            "reason": reason,
        }),
        SyncEvent::MachineFailed { machine, error } => json!({
            "event": "machine_error",
            "machine": machine,
            "error": error,
        }),
        SyncEvent::ItemStaged { item, source } => json!({
            "event": "item_staged",
            "item": item,
            "source": source.display().to_string(),
        }),
        SyncEvent::ItemStageWarning { item, message } => json!({
            "event": "item_stage_warning",
            "item": item,
            "message": message,
        }),
        SyncEvent::ItemApplied {
            machine,
            item,
            action,
            files,
            backups,
        } => json!({
            "event": "item_applied",
            "machine": machine,
            "item": item,
            "action": action,
            "files": files,
            "backups": backups
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
        }),
        SyncEvent::ItemIgnored { machine, item } => json!({
            "event": "item_ignored",
            "machine": machine,
            "item": item,
        }),
        SyncEvent::ItemSkipped {
            machine,
            item,
            reason,
        } => json!({
            "event": "item_skipped",
            "machine": machine,
            "item": item,
            "reason": reason,
        }),
        SyncEvent::ItemFailed {
            machine,
            item,
            error,
        } => json!({
            "event": "item_error",
            "machine": machine,
            "item": item,
            "error": error,
        }),
        SyncEvent::PhaseCompleted {
            phase,
            success,
            error,
        } => json!({
            "event": "phase_complete",
            "phase": phase.as_str(),
            "success": success,
            "error": error,
        }),
    }
}

impl SyncEventSink for JsonEventSink {
    fn on_event(&self, event: SyncEvent) {
        self.write_event(event_to_json(&event));
    }
}
