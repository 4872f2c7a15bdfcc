//! Sync Event Port
//!
//! Provides an observable interface for pull/push runs so every outcome can be
//! reported with its item and machine name, as terminal lines or NDJSON.

use std::path::PathBuf;

/// Half of a sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pull,
    Push,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Pull => "pull",
            Phase::Push => "push",
        }
    }
}

/// Event emitted during sync operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// A phase started
    PhaseStarted { phase: Phase },

    /// A transport call finished (successfully or as a tolerated failure)
    Transport {
        operation: &'static str,
        success: bool,
        detail: String,
    },

    /// Merging from a foreign machine directory started
    MachineStarted {
        machine: String,
        hostname: String,
        timestamp: String,
    },

    /// A machine directory was not merged (no snapshot, or this machine)
    MachineSkipped { machine: String, reason: String },

    /// A machine snapshot could not be read
    MachineFailed { machine: String, error: String },

    /// An item was copied into the staging tree
    ItemStaged { item: String, source: PathBuf },

    /// An item could not be staged; staging continues
    ItemStageWarning { item: String, message: String },

    /// An item was copied or merged into local state
    ItemApplied {
        machine: String,
        item: String,
        action: &'static str,
        files: usize,
        backups: Vec<PathBuf>,
    },

    /// A listed item name this machine does not know
    ItemIgnored { machine: String, item: String },

    /// An item was left untouched
    ItemSkipped {
        machine: String,
        item: String,
        reason: String,
    },

    /// An item failed; remaining items continue
    ItemFailed {
        machine: String,
        item: String,
        error: String,
    },

    /// A phase finished
    PhaseCompleted {
        phase: Phase,
        success: bool,
        error: Option<String>,
    },
}

impl SyncEvent {
    /// Events only shown at verbose level in human output
    pub fn is_detail(&self) -> bool {
        match self {
            SyncEvent::Transport { success, .. } => *success,
            SyncEvent::MachineSkipped { .. } | SyncEvent::ItemIgnored { .. } => true,
            _ => false,
        }
    }
}

/// Trait for receiving sync events
///
/// Implementations:
/// - ConsoleEventSink: human-readable lines
/// - JsonEventSink: NDJSON event stream
/// - NoopEventSink: silent operation
pub trait SyncEventSink {
    fn on_event(&self, event: SyncEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl SyncEventSink for NoopEventSink {
    fn on_event(&self, _event: SyncEvent) {}
}
