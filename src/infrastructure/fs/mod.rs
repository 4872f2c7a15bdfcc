//! File System Helpers
//!
//! Home directory resolution and the local copy/backup primitives shared by
//! staging, merging and the folder transport.

mod home;
mod local;

pub use home::{expand_home, sync_home_dir, SYNC_HOME_VAR};
pub use local::{
    atomic_write, backup_path, copy_file_preserving, copy_tree, list_files, remove_path,
    write_backup, BACKUP_SUFFIX,
};
