//! Human-readable event sink
//!
//! One line per event, indented by nesting: phase, machine, item. Detail
//! events (successful transport calls, quiet skips) need `-v`.

use claude_sync::domain::ports::{Phase, SyncEvent, SyncEventSink};

use crate::ui::context::UiContext;
use crate::ui::icon::Icon;

pub struct ConsoleEventSink {
    ui: UiContext,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self { ui }
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.ui.color, self.ui.unicode)
    }

    /// Render an event, or `None` when it is hidden at this verbosity.
    ///
    /// The flag is true for lines that belong on stderr.
    pub fn render(&self, event: &SyncEvent) -> Option<(String, bool)> {
        if event.is_detail() && self.ui.verbose == 0 {
            return None;
        }

        let line = match event {
            SyncEvent::PhaseStarted { phase } => {
                let label = match phase {
                    Phase::Pull => "Pulling changes from other machines",
                    Phase::Push => "Pushing this machine's snapshot",
                };
                (format!("{} {}", self.icon(Icon::Progress), label), false)
            }
            SyncEvent::Transport {
                operation,
                success: true,
                detail,
            } => {
                let detail = detail.lines().next().unwrap_or("").trim();
                let text = if detail.is_empty() {
                    format!("  {} {}", self.icon(Icon::Arrow), operation)
                } else {
                    format!("  {} {}: {}", self.icon(Icon::Arrow), operation, detail)
                };
                (text, false)
            }
            SyncEvent::Transport { detail, .. } => {
                (format!("  {} {}", self.icon(Icon::Warning), detail), true)
            }
            SyncEvent::MachineStarted {
                machine,
                hostname,
                timestamp,
            } => (
                format!(
                    "  {} {} ({}, {})",
                    self.icon(Icon::Arrow),
                    machine,
                    hostname,
                    timestamp
                ),
                false,
            ),
            SyncEvent::MachineSkipped { machine, reason } => (
                format!("  {} {}: {}", self.icon(Icon::Skipped), machine, reason),
                false,
            ),
            SyncEvent::MachineFailed { machine, error } => (
                format!("  {} {}: {}", self.icon(Icon::Error), machine, error),
                true,
            ),
            SyncEvent::ItemStaged { item, source } => (
                format!(
                    "  {} {} ({})",
                    self.icon(Icon::Success),
                    item,
                    source.display()
                ),
                false,
            ),
            SyncEvent::ItemStageWarning { item, message } => (
                format!("  {} {}: {}", self.icon(Icon::Warning), item, message),
                true,
            ),
            SyncEvent::ItemApplied {
                item,
                action,
                files,
                backups,
                ..
            } => {
                let mut text = format!("    {} {}: {}", self.icon(Icon::Success), item, action);
                if *files > 1 {
                    text.push_str(&format!(" ({} files)", files));
                }
                match backups.as_slice() {
                    [] => {}
                    [single] => text.push_str(&format!(", backup {}", single.display())),
                    many => text.push_str(&format!(", {} backups", many.len())),
                }
                (text, false)
            }
            SyncEvent::ItemIgnored { item, .. } => (
                format!("    {} {}: not known here", self.icon(Icon::Skipped), item),
                false,
            ),
            SyncEvent::ItemSkipped { item, reason, .. } => (
                format!("    {} {}: {}", self.icon(Icon::Skipped), item, reason),
                false,
            ),
            SyncEvent::ItemFailed { item, error, .. } => (
                format!("    {} {}: {}", self.icon(Icon::Error), item, error),
                true,
            ),
            SyncEvent::PhaseCompleted {
                phase,
                success: true,
                ..
            } => (
                format!("{} {} complete", self.icon(Icon::Success), phase_title(*phase)),
                false,
            ),
            SyncEvent::PhaseCompleted { phase, error, .. } => (
                format!(
                    "{} {} failed: {}",
                    self.icon(Icon::Error),
                    phase_title(*phase),
                    error.as_deref().unwrap_or("unknown error")
                ),
                true,
            ),
        };
        Some(line)
    }
}

fn phase_title(phase: Phase) -> &'static str {
    match phase {
        Phase::Pull => "Pull",
        Phase::Push => "Push",
    }
}

impl SyncEventSink for ConsoleEventSink {
    fn on_event(&self, event: SyncEvent) {
        match self.render(&event) {
            Some((line, true)) => eprintln!("{}", line),
            Some((line, false)) => println!("{}", line),
            None => {}
        }
    }
}
