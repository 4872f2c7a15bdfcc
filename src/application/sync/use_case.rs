//! Sync Use Case
//!
//! Orchestrates a run:
//! 1. Make sure a working copy of the shared repository exists (clone once)
//! 2. Pull: refresh the working copy, then merge every foreign machine
//!    directory into local state
//! 3. Push: stage this machine, replace its directory in the working copy,
//!    then add, commit and push
//!
//! Merge rules live in the merge engine; this type only sequences them.

use std::fs;
use std::path::{Path, PathBuf};

use crate::application::merge::{MergeEngine, MergeResult};
use crate::application::staging::StagingBuilder;
use crate::domain::entities::{ItemCatalog, SyncMetadata, METADATA_FILE};
use crate::domain::ports::{Phase, SyncEvent, SyncEventSink, TransportProvider, TransportResult};
use crate::domain::value_objects::{ExcludePatterns, MachineId};
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::fs::{copy_tree, remove_path};

use super::options::{Operation, SyncOptions};
use super::result::{ItemOutcome, PullReport, PushReport, SyncReport};

/// Sync orchestrator, parameterized by its transport
pub struct SyncOrchestrator<'a> {
    transport: &'a dyn TransportProvider,
    catalog: &'a ItemCatalog,
    excludes: &'a ExcludePatterns,
    engine: MergeEngine,
}

impl<'a> SyncOrchestrator<'a> {
    pub fn new(
        transport: &'a dyn TransportProvider,
        catalog: &'a ItemCatalog,
        excludes: &'a ExcludePatterns,
    ) -> Self {
        Self {
            transport,
            catalog,
            excludes,
            engine: MergeEngine::new(),
        }
    }

    /// Run the requested halves, reporting progress to `events`.
    ///
    /// A clone failure ends the run; otherwise pull and push fail
    /// independently. A failed pull merges nothing.
    pub fn run(
        &self,
        operation: Operation,
        options: &SyncOptions,
        events: &dyn SyncEventSink,
    ) -> SyncReport {
        let mut report = SyncReport::new(operation);

        if operation.includes_pull() {
            events.on_event(SyncEvent::PhaseStarted { phase: Phase::Pull });
            let (outcome, aborted) = match self.ensure_working_copy(options, events) {
                Ok(()) => (self.pull(options, events), false),
                Err(e) => (Err(e), true),
            };
            complete_phase(Phase::Pull, outcome.as_ref().err(), events);
            report.pull = Some(outcome);
            if aborted {
                return report;
            }
        }

        if operation.includes_push() {
            events.on_event(SyncEvent::PhaseStarted { phase: Phase::Push });
            let outcome = self
                .ensure_working_copy(options, events)
                .and_then(|()| self.push(options, events));
            complete_phase(Phase::Push, outcome.as_ref().err(), events);
            report.push = Some(outcome);
        }

        report
    }

    /// Clone the repository on first use.
    fn ensure_working_copy(
        &self,
        options: &SyncOptions,
        events: &dyn SyncEventSink,
    ) -> SyncResult<()> {
        if options.repo_dir.is_dir() {
            return Ok(());
        }
        if let Some(parent) = options.repo_dir.parent() {
            fs::create_dir_all(parent)?;
        }
        let result = self
            .transport
            .clone_repo(&options.repo_url, &options.repo_dir);
        record_transport("clone", &result, events);
        result?;
        Ok(())
    }

    fn pull(&self, options: &SyncOptions, events: &dyn SyncEventSink) -> SyncResult<PullReport> {
        let mut report = PullReport::default();

        let fetched = self.transport.pull(&options.repo_dir);
        record_transport("pull", &fetched, events);
        // A failed pull can leave conflict markers in the working copy
        fetched?;

        for (name, dir) in machine_dirs(&options.repo_dir)? {
            if name == options.machine_id.as_str() {
                events.on_event(SyncEvent::MachineSkipped {
                    machine: name,
                    reason: "this machine".to_string(),
                });
                continue;
            }
            self.merge_machine(&name, &dir, &options.machine_id, &mut report, events);
        }

        Ok(report)
    }

    /// Merge every item listed in one machine's snapshot.
    fn merge_machine(
        &self,
        name: &str,
        dir: &Path,
        own_id: &MachineId,
        report: &mut PullReport,
        events: &dyn SyncEventSink,
    ) {
        let metadata_path = dir.join(METADATA_FILE);
        if !metadata_path.is_file() {
            events.on_event(SyncEvent::MachineSkipped {
                machine: name.to_string(),
                reason: format!("no {}", METADATA_FILE),
            });
            return;
        }

        let metadata = match read_metadata(&metadata_path) {
            Ok(metadata) => metadata,
            Err(error) => {
                report.warnings.push(format!("{}: {}", name, error));
                events.on_event(SyncEvent::MachineFailed {
                    machine: name.to_string(),
                    error,
                });
                return;
            }
        };

        if &metadata.machine_id == own_id {
            events.on_event(SyncEvent::MachineSkipped {
                machine: name.to_string(),
                reason: "snapshot belongs to this machine".to_string(),
            });
            return;
        }

        events.on_event(SyncEvent::MachineStarted {
            machine: name.to_string(),
            hostname: metadata.hostname.clone(),
            timestamp: metadata.timestamp.clone(),
        });
        report.machines.push(name.to_string());

        for item_name in &metadata.synced_items {
            let Some(item) = self.catalog.get(item_name) else {
                events.on_event(SyncEvent::ItemIgnored {
                    machine: name.to_string(),
                    item: item_name.clone(),
                });
                continue;
            };

            let remote = dir.join(&item.name);
            let local = self.catalog.destination_path(item);
            let result = self.engine.merge_item(item, &remote, &local, name);

            events.on_event(match &result {
                Ok(MergeResult::Skipped { reason }) => SyncEvent::ItemSkipped {
                    machine: name.to_string(),
                    item: item.name.clone(),
                    reason: reason.clone(),
                },
                Ok(merged) => SyncEvent::ItemApplied {
                    machine: name.to_string(),
                    item: item.name.clone(),
                    action: merged.action(),
                    files: merged.files(),
                    backups: merged.backups().to_vec(),
                },
                Err(e) => SyncEvent::ItemFailed {
                    machine: name.to_string(),
                    item: item.name.clone(),
                    error: e.to_string(),
                },
            });

            report.items.push(ItemOutcome {
                machine: name.to_string(),
                item: item.name.clone(),
                result,
            });
        }
    }

    fn push(&self, options: &SyncOptions, events: &dyn SyncEventSink) -> SyncResult<PushReport> {
        let builder = StagingBuilder::new(self.catalog, self.excludes, &options.staging_root);
        let tree = builder.stage(
            options.level,
            &options.machine_id,
            &options.hostname,
            events,
        )?;

        let dest = options.repo_dir.join(options.machine_id.as_str());
        remove_path(&dest)
            .and_then(|()| copy_tree(&tree.root, &dest, &ExcludePatterns::empty()))
            .map_err(|source| SyncError::Publish {
                path: dest.clone(),
                source,
            })?;

        let added = self.transport.add(&options.repo_dir);
        record_transport("add", &added, events);
        added?;

        let commit_message = format!(
            "Sync from {} at {}",
            options.machine_id, tree.metadata.timestamp
        );
        let committed = self.transport.commit(&options.repo_dir, &commit_message);
        // Nothing to commit is not an error; earlier commits may still need pushing
        record_transport("commit", &committed, events);

        let pushed = self.transport.push(&options.repo_dir);
        record_transport("push", &pushed, events);
        pushed?;

        Ok(PushReport {
            staged: tree.metadata.synced_items,
            warnings: tree.warnings,
            commit_message,
            committed: committed.is_ok(),
        })
    }
}

/// Top-level machine directories, sorted, skipping hidden entries.
fn machine_dirs(repo_dir: &Path) -> SyncResult<Vec<(String, PathBuf)>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(repo_dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || !entry.path().is_dir() {
            continue;
        }
        dirs.push((name, entry.path()));
    }
    dirs.sort();
    Ok(dirs)
}

fn read_metadata(path: &Path) -> Result<SyncMetadata, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", METADATA_FILE, e))?;
    SyncMetadata::from_json(&text).map_err(|e| format!("malformed {}: {}", METADATA_FILE, e))
}

fn record_transport(
    operation: &'static str,
    result: &TransportResult,
    events: &dyn SyncEventSink,
) {
    let (success, detail) = match result {
        Ok(output) => (true, output.diagnostics.clone()),
        Err(e) => (false, e.to_string()),
    };
    events.on_event(SyncEvent::Transport {
        operation,
        success,
        detail,
    });
}

fn complete_phase(phase: Phase, error: Option<&SyncError>, events: &dyn SyncEventSink) {
    events.on_event(SyncEvent::PhaseCompleted {
        phase,
        success: error.is_none(),
        error: error.map(|e| e.to_string()),
    });
}
