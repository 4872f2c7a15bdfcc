//! Directory merges
//!
//! Append mode only fills in files that are missing locally. Update mode also
//! replaces local files whose remote counterpart is strictly newer. Neither
//! mode deletes local-only files.

use std::fs;
use std::path::{Path, PathBuf};

use super::{same_content, MergeError, MergeResult};
use crate::infrastructure::fs::{copy_file_preserving, list_files, write_backup};

/// How existing local files are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryMode {
    /// Existing local files are never touched
    Append,
    /// Existing local files are replaced by strictly newer remote files
    Update,
}

/// Per-file tally of a directory merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryMergeStats {
    /// The local directory did not exist before the merge
    pub created_root: bool,
    /// Remote files copied to paths that were free locally
    pub copied: usize,
    /// Local files replaced by newer remote files
    pub replaced: usize,
    /// Remote files left out because the local file wins
    pub kept: usize,
    pub backups: Vec<PathBuf>,
}

impl DirectoryMergeStats {
    pub fn written(&self) -> usize {
        self.copied + self.replaced
    }
}

impl From<DirectoryMergeStats> for MergeResult {
    fn from(stats: DirectoryMergeStats) -> Self {
        let files = stats.written();
        if files == 0 {
            return MergeResult::skipped("up to date");
        }
        if stats.created_root {
            MergeResult::Copied {
                files,
                backups: stats.backups,
            }
        } else {
            MergeResult::Merged {
                files,
                backups: stats.backups,
            }
        }
    }
}

/// Merge every file under `remote` into `local`.
pub fn merge_directory(
    remote: &Path,
    local: &Path,
    mode: DirectoryMode,
) -> Result<DirectoryMergeStats, MergeError> {
    if local.exists() && !local.is_dir() {
        return Err(MergeError::DestinationConflict {
            path: local.to_path_buf(),
            expected: "directory",
        });
    }

    let mut stats = DirectoryMergeStats {
        created_root: !local.exists(),
        ..Default::default()
    };
    let files = list_files(remote).map_err(MergeError::io("list", remote))?;
    if stats.created_root {
        fs::create_dir_all(local).map_err(MergeError::io("create", local))?;
    }

    for rel in files {
        let src = remote.join(&rel);
        let dst = local.join(&rel);

        if !dst.exists() {
            copy_file_preserving(&src, &dst).map_err(MergeError::io("copy", &src))?;
            stats.copied += 1;
            continue;
        }

        if mode == DirectoryMode::Append || dst.is_dir() {
            stats.kept += 1;
            continue;
        }

        let newer = is_strictly_newer(&src, &dst)?;
        if newer && !same_content(&src, &dst).map_err(MergeError::io("compare", &dst))? {
            let backup = write_backup(&dst).map_err(MergeError::io("back up", &dst))?;
            copy_file_preserving(&src, &dst).map_err(MergeError::io("copy", &src))?;
            stats.backups.push(backup);
            stats.replaced += 1;
        } else {
            stats.kept += 1;
        }
    }

    Ok(stats)
}

fn is_strictly_newer(src: &Path, dst: &Path) -> Result<bool, MergeError> {
    let remote = fs::metadata(src)
        .and_then(|m| m.modified())
        .map_err(MergeError::io("stat", src))?;
    let local = fs::metadata(dst)
        .and_then(|m| m.modified())
        .map_err(MergeError::io("stat", dst))?;
    Ok(remote > local)
}
