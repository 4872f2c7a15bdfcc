//! Machine identity
//!
//! Derives the per-machine identifier from the host name and the identity of
//! the invoking user. The result is persisted in configuration on first use
//! and read back afterwards, so it is computed at most once per machine.

use std::path::Path;

use crate::domain::value_objects::MachineId;
use crate::infrastructure::fs::sync_home_dir;

/// Host name of this machine, or `"unknown-host"`.
pub fn current_hostname() -> String {
    hostname::get()
        .ok()
        .map(|h| h.to_string_lossy().into_owned())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| "unknown-host".to_string())
}

/// Stable identity of the invoking user.
///
/// On Unix this is the numeric uid owning the home directory; elsewhere the
/// login name from the environment.
pub fn current_user() -> String {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let Some(meta) = sync_home_dir().and_then(|home| std::fs::metadata(home).ok()) {
            return meta.uid().to_string();
        }
    }

    user_from_env(|key| std::env::var(key).ok())
        .or_else(|| {
            sync_home_dir()
                .as_deref()
                .and_then(Path::file_name)
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "unknown-user".to_string())
}

fn user_from_env(get_env: impl Fn(&str) -> Option<String>) -> Option<String> {
    ["USER", "USERNAME", "LOGNAME"]
        .iter()
        .find_map(|key| get_env(key).filter(|v| !v.is_empty()))
}

/// Identifier for this machine and user.
pub fn derive_machine_id() -> MachineId {
    MachineId::derive(&current_hostname(), &current_user())
}
