//! Merge Engine
//!
//! Reconciles one item of a foreign machine's snapshot with the live copy on
//! this machine, using the strategy the catalog assigns to the item.
//!
//! ## Structure
//!
//! - `mod.rs` - `MergeEngine`, results, errors and the single-file strategies
//! - `directory` - append-mode and update-mode directory merges
//!
//! ## Usage
//!
//! ```ignore
//! use claude_sync::application::merge::MergeEngine;
//!
//! let result = MergeEngine::new().merge_item(item, &remote, &local, "1a2b3c4d")?;
//! ```

mod directory;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::entities::{MergeStrategy, SyncItem};
use crate::domain::services::{
    merge_assistant_config, merge_context, order_like, AssistantConfig, ContextMerge,
};
use crate::infrastructure::fs::{atomic_write, copy_file_preserving, write_backup};

pub use directory::{merge_directory, DirectoryMergeStats, DirectoryMode};

/// Outcome of merging one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeResult {
    /// Remote content written where no local content existed
    Copied { files: usize, backups: Vec<PathBuf> },
    /// Remote content combined with, or written over, existing local content
    Merged { files: usize, backups: Vec<PathBuf> },
    /// Nothing was written
    Skipped { reason: String },
}

impl MergeResult {
    pub fn skipped(reason: impl Into<String>) -> Self {
        MergeResult::Skipped {
            reason: reason.into(),
        }
    }

    pub fn action(&self) -> &'static str {
        match self {
            MergeResult::Copied { .. } => "copied",
            MergeResult::Merged { .. } => "merged",
            MergeResult::Skipped { .. } => "skipped",
        }
    }

    pub fn files(&self) -> usize {
        match self {
            MergeResult::Copied { files, .. } | MergeResult::Merged { files, .. } => *files,
            MergeResult::Skipped { .. } => 0,
        }
    }

    pub fn backups(&self) -> &[PathBuf] {
        match self {
            MergeResult::Copied { backups, .. } | MergeResult::Merged { backups, .. } => backups,
            MergeResult::Skipped { .. } => &[],
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, MergeResult::Skipped { .. })
    }
}

/// Failure while merging one item
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The local path exists with the wrong shape and is left alone
    #[error("{path} exists but is not a {expected}")]
    DestinationConflict {
        path: PathBuf,
        expected: &'static str,
    },
}

impl MergeError {
    pub(crate) fn io<'a>(
        operation: &'static str,
        path: &'a Path,
    ) -> impl FnOnce(io::Error) -> Self + 'a {
        move |source| MergeError::Io {
            operation,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Stateless dispatcher from merge strategy to merge routine
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeEngine;

impl MergeEngine {
    pub fn new() -> Self {
        Self
    }

    /// Merge the staged `remote` entry into `local`.
    ///
    /// `source` labels the remote machine in provenance headers.
    pub fn merge_item(
        &self,
        item: &SyncItem,
        remote: &Path,
        local: &Path,
        source: &str,
    ) -> Result<MergeResult, MergeError> {
        let strategy = item.strategy;
        if !remote.exists() {
            return Ok(MergeResult::skipped("missing from snapshot"));
        }
        if strategy.expects_directory() != remote.is_dir() {
            let expected = if strategy.expects_directory() {
                "directory"
            } else {
                "file"
            };
            return Ok(MergeResult::skipped(format!(
                "staged entry is not a {} ({} merge)",
                expected,
                strategy.label()
            )));
        }

        match strategy {
            MergeStrategy::StructuredConfig => self.merge_structured_config(remote, local),
            MergeStrategy::AppendText => self.merge_context_file(remote, local, source),
            MergeStrategy::AppendDirectory => {
                merge_directory(remote, local, DirectoryMode::Append).map(Into::into)
            }
            MergeStrategy::UpdateDirectory => {
                merge_directory(remote, local, DirectoryMode::Update).map(Into::into)
            }
            MergeStrategy::PlainFile => self.replace_file(remote, local),
        }
    }

    fn merge_structured_config(
        &self,
        remote: &Path,
        local: &Path,
    ) -> Result<MergeResult, MergeError> {
        ensure_not_directory(local)?;

        let remote_text = fs::read_to_string(remote).map_err(MergeError::io("read", remote))?;
        let remote_config = match AssistantConfig::from_json(&remote_text) {
            Ok(config) => config,
            Err(e) => return Ok(malformed(remote, &e)),
        };

        let existed = local.is_file();
        let (local_config, local_layout) = if existed {
            let text = fs::read_to_string(local).map_err(MergeError::io("read", local))?;
            // The raw value keeps the file's key order for the write-back
            let parsed = serde_json::from_str::<serde_json::Value>(&text).and_then(|value| {
                AssistantConfig::from_value(value.clone()).map(|config| (config, value))
            });
            match parsed {
                Ok(parsed) => parsed,
                Err(e) => return Ok(malformed(local, &e)),
            }
        } else {
            (AssistantConfig::default(), serde_json::Value::Null)
        };

        let merged = merge_assistant_config(local_config.clone(), remote_config);
        if existed && merged == local_config {
            return Ok(MergeResult::skipped("already up to date"));
        }

        let content = serde_json::to_value(&merged)
            .map(|value| order_like(value, &local_layout))
            .and_then(|value| serde_json::to_string_pretty(&value))
            .map_err(|e| MergeError::Io {
                operation: "serialize",
                path: local.to_path_buf(),
                source: e.into(),
            })?;
        atomic_write(local, content.as_bytes()).map_err(MergeError::io("write", local))?;

        let backups = Vec::new();
        Ok(if existed {
            MergeResult::Merged { files: 1, backups }
        } else {
            MergeResult::Copied { files: 1, backups }
        })
    }

    fn merge_context_file(
        &self,
        remote: &Path,
        local: &Path,
        source: &str,
    ) -> Result<MergeResult, MergeError> {
        ensure_not_directory(local)?;

        if !local.exists() {
            copy_file_preserving(remote, local).map_err(MergeError::io("copy", remote))?;
            return Ok(MergeResult::Copied {
                files: 1,
                backups: Vec::new(),
            });
        }

        let remote_text = match fs::read_to_string(remote) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Ok(MergeResult::skipped(format!(
                    "{} is not UTF-8 text",
                    remote.display()
                )))
            }
            Err(e) => return Err(MergeError::io("read", remote)(e)),
        };
        let local_text = match fs::read_to_string(local) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Ok(MergeResult::skipped(format!(
                    "{} is not UTF-8 text",
                    local.display()
                )))
            }
            Err(e) => return Err(MergeError::io("read", local)(e)),
        };

        match merge_context(&local_text, &remote_text, source) {
            ContextMerge::AlreadyMerged => Ok(MergeResult::skipped("already merged")),
            ContextMerge::Appended(content) => {
                let backup = write_backup(local).map_err(MergeError::io("back up", local))?;
                atomic_write(local, content.as_bytes()).map_err(MergeError::io("write", local))?;
                Ok(MergeResult::Merged {
                    files: 1,
                    backups: vec![backup],
                })
            }
        }
    }

    fn replace_file(&self, remote: &Path, local: &Path) -> Result<MergeResult, MergeError> {
        ensure_not_directory(local)?;

        if !local.exists() {
            copy_file_preserving(remote, local).map_err(MergeError::io("copy", remote))?;
            return Ok(MergeResult::Copied {
                files: 1,
                backups: Vec::new(),
            });
        }

        if same_content(remote, local).map_err(MergeError::io("compare", local))? {
            return Ok(MergeResult::skipped("identical"));
        }

        let backup = write_backup(local).map_err(MergeError::io("back up", local))?;
        copy_file_preserving(remote, local).map_err(MergeError::io("copy", remote))?;
        Ok(MergeResult::Merged {
            files: 1,
            backups: vec![backup],
        })
    }
}

fn ensure_not_directory(local: &Path) -> Result<(), MergeError> {
    if local.is_dir() {
        return Err(MergeError::DestinationConflict {
            path: local.to_path_buf(),
            expected: "file",
        });
    }
    Ok(())
}

fn malformed(path: &Path, error: &serde_json::Error) -> MergeResult {
    MergeResult::skipped(format!("malformed JSON in {}: {}", path.display(), error))
}

/// Byte equality of two files, checking sizes first
pub(crate) fn same_content(a: &Path, b: &Path) -> io::Result<bool> {
    if fs::metadata(a)?.len() != fs::metadata(b)?.len() {
        return Ok(false);
    }
    Ok(fs::read(a)? == fs::read(b)?)
}
