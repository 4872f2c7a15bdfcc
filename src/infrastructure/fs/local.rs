//! Local file operations
//!
//! Byte-for-byte copies that keep modification times, recursive tree copies,
//! atomic whole-file replacement and backups.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::domain::value_objects::ExcludePatterns;

/// Suffix appended to a file name to form its backup name
pub const BACKUP_SUFFIX: &str = ".bak";

/// Write content to a file atomically.
///
/// Uses tempfile + rename in the destination directory so readers never see a
/// partially written file. A symlinked destination is written through: the
/// link stays and its target receives the content.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let target = resolve_symlink(path)?;
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;
    temp.persist(&target).map_err(|e| e.error)?;
    Ok(())
}

/// The file a write to `path` should land in.
///
/// Dangling links resolve to their (not yet existing) target.
fn resolve_symlink(path: &Path) -> io::Result<PathBuf> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => match fs::canonicalize(path) {
            Ok(resolved) => Ok(resolved),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let link = fs::read_link(path)?;
                Ok(match path.parent() {
                    Some(parent) => parent.join(link),
                    None => link,
                })
            }
            Err(e) => Err(e),
        },
        Ok(_) => Ok(path.to_path_buf()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(path.to_path_buf()),
        Err(e) => Err(e),
    }
}

/// Copy one file, creating parent directories and keeping the source mtime.
pub fn copy_file_preserving(src: &Path, dst: &Path) -> io::Result<u64> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    let bytes = fs::copy(src, dst)?;
    let modified = fs::metadata(src)?.modified()?;
    // Read-only copies still accept new times on Unix when opened for reading
    let file = fs::OpenOptions::new()
        .write(true)
        .open(dst)
        .or_else(|_| File::open(dst))?;
    file.set_modified(modified)?;
    Ok(bytes)
}

/// Recursively copy `src` into `dst`, skipping excluded paths.
///
/// Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path, excludes: &ExcludePatterns) -> io::Result<usize> {
    fs::create_dir_all(dst)?;
    copy_tree_inner(src, dst, Path::new(""), excludes)
}

fn copy_tree_inner(
    src: &Path,
    dst: &Path,
    rel: &Path,
    excludes: &ExcludePatterns,
) -> io::Result<usize> {
    let mut copied = 0;
    for entry in fs::read_dir(src.join(rel))? {
        let entry = entry?;
        let rel_path = rel.join(entry.file_name());
        // Follow symlinks so the snapshot holds real content
        let meta = fs::metadata(entry.path())?;

        if excludes.is_excluded(&rel_path, meta.is_dir()) {
            continue;
        }

        if meta.is_dir() {
            fs::create_dir_all(dst.join(&rel_path))?;
            copied += copy_tree_inner(src, dst, &rel_path, excludes)?;
        } else {
            copy_file_preserving(&entry.path(), &dst.join(&rel_path))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// All regular files under `root`, as paths relative to `root`, sorted.
pub fn list_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_files(root, Path::new(""), &mut files)?;
    files.sort();
    Ok(files)
}

fn collect_files(root: &Path, rel: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(root.join(rel))? {
        let entry = entry?;
        let rel_path = rel.join(entry.file_name());
        let meta = fs::metadata(entry.path())?;
        if meta.is_dir() {
            collect_files(root, &rel_path, out)?;
        } else {
            out.push(rel_path);
        }
    }
    Ok(())
}

/// First unused backup path for `path`: `<name>.bak`, then `<name>.bak.1`, ...
///
/// Existing backups are never reused.
pub fn backup_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let base = path.with_file_name(format!("{}{}", file_name, BACKUP_SUFFIX));
    if !base.exists() {
        return base;
    }
    (1..)
        .map(|n| path.with_file_name(format!("{}{}.{}", file_name, BACKUP_SUFFIX, n)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(base)
}

/// Copy `path` to a fresh backup next to it and return the backup location.
pub fn write_backup(path: &Path) -> io::Result<PathBuf> {
    let backup = backup_path(path);
    copy_file_preserving(path, &backup)?;
    Ok(backup)
}

/// Remove a file or directory tree if it exists.
pub fn remove_path(path: &Path) -> io::Result<()> {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
