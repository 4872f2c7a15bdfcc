//! Shared-folder transport
//!
//! Uses a plain directory (network mount, synced cloud folder) as the shared
//! repository. The working copy is a mirror of that directory; a push only
//! writes this machine's own directory back, so concurrent machines never
//! overwrite each other's snapshots.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::ports::{TransportError, TransportOutput, TransportProvider, TransportResult};
use crate::domain::value_objects::{ExcludePatterns, MachineId};
use crate::infrastructure::fs::{copy_tree, expand_home, remove_path};

/// Transport backed by a shared directory
#[derive(Debug, Clone)]
pub struct FolderTransport {
    remote_root: PathBuf,
    machine_id: MachineId,
}

impl FolderTransport {
    /// `location` is a path or `file://` URL; `~` is expanded.
    pub fn new(location: &str, machine_id: MachineId) -> Self {
        Self {
            remote_root: resolve_location(location),
            machine_id,
        }
    }
}

/// Turn a configured location into a directory path
pub fn resolve_location(location: &str) -> PathBuf {
    let trimmed = location.trim();
    let path = trimmed.strip_prefix("file://").unwrap_or(trimmed);
    expand_home(path)
}

fn io_failure(operation: &'static str, path: &Path, e: std::io::Error) -> TransportError {
    TransportError::CommandFailed {
        operation,
        message: format!("{}: {}", path.display(), e),
    }
}

/// Replace `dst` with a full copy of `src`
fn mirror_dir(operation: &'static str, src: &Path, dst: &Path) -> Result<usize, TransportError> {
    remove_path(dst).map_err(|e| io_failure(operation, dst, e))?;
    copy_tree(src, dst, &ExcludePatterns::empty()).map_err(|e| io_failure(operation, src, e))
}

/// Visible top-level directories of `root`
fn top_level_dirs(operation: &'static str, root: &Path) -> Result<Vec<PathBuf>, TransportError> {
    let entries = fs::read_dir(root).map_err(|e| io_failure(operation, root, e))?;
    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_failure(operation, root, e))?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

impl TransportProvider for FolderTransport {
    fn name(&self) -> &'static str {
        "folder"
    }

    fn clone_repo(&self, url: &str, dest: &Path) -> TransportResult {
        let source = resolve_location(url);
        fs::create_dir_all(&source).map_err(|e| io_failure("clone", &source, e))?;
        let files = mirror_dir("clone", &source, dest)?;
        Ok(TransportOutput::new(format!(
            "copied {} files from {}",
            files,
            source.display()
        )))
    }

    fn pull(&self, cwd: &Path) -> TransportResult {
        if !self.remote_root.is_dir() {
            return Err(TransportError::CommandFailed {
                operation: "pull",
                message: format!("shared folder {} not found", self.remote_root.display()),
            });
        }

        let mut files = 0;
        for dir in top_level_dirs("pull", &self.remote_root)? {
            if let Some(name) = dir.file_name() {
                files += mirror_dir("pull", &dir, &cwd.join(name))?;
            }
        }
        Ok(TransportOutput::new(format!("refreshed {} files", files)))
    }

    fn add(&self, _cwd: &Path) -> TransportResult {
        Ok(TransportOutput::empty())
    }

    fn commit(&self, _cwd: &Path, _message: &str) -> TransportResult {
        Ok(TransportOutput::empty())
    }

    fn push(&self, cwd: &Path) -> TransportResult {
        let own = cwd.join(self.machine_id.as_str());
        if !own.is_dir() {
            return Err(TransportError::CommandFailed {
                operation: "push",
                message: format!("nothing staged at {}", own.display()),
            });
        }
        fs::create_dir_all(&self.remote_root)
            .map_err(|e| io_failure("push", &self.remote_root, e))?;
        let files = mirror_dir("push", &own, &self.remote_root.join(self.machine_id.as_str()))?;
        Ok(TransportOutput::new(format!(
            "published {} files to {}",
            files,
            self.remote_root.display()
        )))
    }
}
