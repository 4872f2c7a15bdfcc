//! Configuration module for claude-sync
//!
//! Resolution order:
//! 1. CLI flags (highest priority, applied by the command layer)
//! 2. Environment variables (CLAUDE_SYNC_*)
//! 3. `~/.claude-sync/config.json`
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    config_path, load_or_create, load_with_warnings, save, with_env_overrides, ConfigWarning,
    CONFIG_PATH_VAR, LEVEL_VAR, REPO_VAR,
};
pub use types::{Config, SyncMethod, SYNC_DIR_NAME};
