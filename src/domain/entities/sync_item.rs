//! Sync item entity
//!
//! One named artifact that takes part in synchronization.

use std::path::PathBuf;

use crate::domain::value_objects::Tier;

/// Filesystem shape of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    File,
    Directory,
    /// The shared context document; may live in the working directory
    SpecialContextFile,
}

impl ItemKind {
    pub fn is_directory(self) -> bool {
        matches!(self, ItemKind::Directory)
    }
}

/// How a remote copy of an item is reconciled with the local one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeStrategy {
    /// Field-aware JSON merge of the assistant configuration
    StructuredConfig,
    /// Additive merge of the context document
    AppendText,
    /// Copy remote files that do not exist locally; never overwrite
    AppendDirectory,
    /// Copy remote files that are missing locally or strictly newer
    UpdateDirectory,
    /// Back up and overwrite
    PlainFile,
}

impl MergeStrategy {
    /// Whether the staged entry must be a directory
    pub fn expects_directory(self) -> bool {
        matches!(
            self,
            MergeStrategy::AppendDirectory | MergeStrategy::UpdateDirectory
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            MergeStrategy::StructuredConfig => "structured-config",
            MergeStrategy::AppendText => "append-text",
            MergeStrategy::AppendDirectory => "append-directory",
            MergeStrategy::UpdateDirectory => "update-directory",
            MergeStrategy::PlainFile => "plain-file",
        }
    }
}

/// A named item bound to a local path on this machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncItem {
    pub name: String,
    pub local_path: PathBuf,
    pub tier: Tier,
    pub kind: ItemKind,
    pub strategy: MergeStrategy,
}

impl SyncItem {
    pub fn new(
        name: impl Into<String>,
        local_path: impl Into<PathBuf>,
        tier: Tier,
        kind: ItemKind,
        strategy: MergeStrategy,
    ) -> Self {
        Self {
            name: name.into(),
            local_path: local_path.into(),
            tier,
            kind,
            strategy,
        }
    }
}
