//! Home directory resolution with test isolation support.
//!
//! On Windows, `dirs::home_dir()` uses the system API rather than environment
//! variables, so setting `HOME` in tests has no effect there. Every path this
//! tool derives from the home directory goes through [`sync_home_dir`], which
//! honors `CLAUDE_SYNC_HOME` first.

use std::path::PathBuf;

/// Environment variable overriding the home directory.
pub const SYNC_HOME_VAR: &str = "CLAUDE_SYNC_HOME";

/// Home directory for all item and configuration paths.
///
/// Returns `None` if neither `CLAUDE_SYNC_HOME` is set nor the system home can
/// be resolved.
pub fn sync_home_dir() -> Option<PathBuf> {
    std::env::var_os(SYNC_HOME_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// Replace a leading `~` with the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    let home = sync_home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
