//! Sync Options

use std::path::PathBuf;

use crate::domain::value_objects::{MachineId, SyncLevel};

/// Which halves of a sync run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Pull,
    Push,
    /// Pull, then push
    Both,
}

impl Operation {
    pub fn includes_pull(self) -> bool {
        matches!(self, Operation::Pull | Operation::Both)
    }

    pub fn includes_push(self) -> bool {
        matches!(self, Operation::Push | Operation::Both)
    }
}

/// Parameters of a sync run
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub machine_id: MachineId,
    pub hostname: String,
    /// Repository URL or shared folder handed to the transport on first use
    pub repo_url: String,
    /// Local working copy of the shared repository
    pub repo_dir: PathBuf,
    /// Parent of this machine's staging tree
    pub staging_root: PathBuf,
    /// Level used when staging
    pub level: SyncLevel,
}
