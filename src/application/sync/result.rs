//! Sync Result
//!
//! Outcome types for sync runs.

use crate::application::merge::{MergeError, MergeResult};
use crate::application::staging::StageWarning;
use crate::error::SyncError;

use super::options::Operation;

/// Merge outcome of one item from one machine
#[derive(Debug)]
pub struct ItemOutcome {
    pub machine: String,
    pub item: String,
    pub result: Result<MergeResult, MergeError>,
}

/// Result of the pull half
#[derive(Debug, Default)]
pub struct PullReport {
    /// Machines whose snapshots were merged, in processing order
    pub machines: Vec<String>,
    pub items: Vec<ItemOutcome>,
    /// Tolerated problems (failed fetch, unreadable snapshots)
    pub warnings: Vec<String>,
}

impl PullReport {
    pub fn failed_items(&self) -> impl Iterator<Item = &ItemOutcome> {
        self.items.iter().filter(|outcome| outcome.result.is_err())
    }

    /// Items that wrote something locally
    pub fn changed_items(&self) -> usize {
        self.items
            .iter()
            .filter(|outcome| matches!(&outcome.result, Ok(r) if !r.is_skipped()))
            .count()
    }
}

/// Result of the push half
#[derive(Debug, Default)]
pub struct PushReport {
    pub staged: Vec<String>,
    pub warnings: Vec<StageWarning>,
    pub commit_message: String,
    /// Whether the commit produced a new revision
    pub committed: bool,
}

/// Result of a whole run
///
/// A half is `None` when it was not requested, or was not attempted because
/// the working copy could not be created.
#[derive(Debug)]
pub struct SyncReport {
    pub operation: Operation,
    pub pull: Option<Result<PullReport, SyncError>>,
    pub push: Option<Result<PushReport, SyncError>>,
}

impl SyncReport {
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            pull: None,
            push: None,
        }
    }

    pub fn failed_item_count(&self) -> usize {
        match &self.pull {
            Some(Ok(pull)) => pull.failed_items().count(),
            _ => 0,
        }
    }

    /// Every requested half ran and no item failed
    pub fn is_success(&self) -> bool {
        let pull_ok = match &self.pull {
            Some(result) => result.is_ok(),
            None => !self.operation.includes_pull(),
        };
        let push_ok = match &self.push {
            Some(result) => result.is_ok(),
            None => !self.operation.includes_push(),
        };
        pull_ok && push_ok && self.failed_item_count() == 0
    }
}
