//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ExcludePatterns, MachineId, SyncLevel};
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::fs::expand_home;

/// Directory under home holding configuration and data
pub const SYNC_DIR_NAME: &str = ".claude-sync";

/// How the shared repository is reached
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SyncMethod {
    /// A git remote (default)
    #[default]
    Git,
    /// A shared directory
    Folder,
}

impl SyncMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SyncMethod::Git => "git",
            SyncMethod::Folder => "folder",
        }
    }
}

/// Persisted settings (`~/.claude-sync/config.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sync_method: SyncMethod,

    /// Repository URL (git) or shared directory (folder)
    #[serde(default)]
    pub git_repo: String,

    /// Generated once on first use
    #[serde(default)]
    pub machine_id: Option<MachineId>,

    #[serde(default)]
    pub sync_level: SyncLevel,

    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Override for the data directory (default `~/.claude-sync/data`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_dir: Option<String>,
}

/// Backups written beside merged files stay on this machine
const BACKUP_PATTERNS: [&str; 2] = ["*.bak", "*.bak.*"];

fn default_exclude_patterns() -> Vec<String> {
    vec!["*.log".to_string(), "*.tmp".to_string(), "cache/*".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync_method: SyncMethod::default(),
            git_repo: String::new(),
            machine_id: None,
            sync_level: SyncLevel::default(),
            exclude_patterns: default_exclude_patterns(),
            sync_dir: None,
        }
    }
}

impl Config {
    /// Default configuration for a machine
    pub fn for_machine(machine_id: MachineId) -> Self {
        Self {
            machine_id: Some(machine_id),
            ..Self::default()
        }
    }

    /// Repository location, or a ConfigError if setup has not run
    pub fn require_repo(&self) -> SyncResult<&str> {
        let repo = self.git_repo.trim();
        if repo.is_empty() {
            return Err(SyncError::config(
                "no repository configured, run 'claude-sync setup --git-repo <url>' first",
            ));
        }
        Ok(repo)
    }

    pub fn require_machine_id(&self) -> SyncResult<&MachineId> {
        self.machine_id
            .as_ref()
            .ok_or_else(|| SyncError::config("machine_id missing from configuration"))
    }

    /// Data directory holding the working copy and staging area
    pub fn data_dir(&self, home: &Path) -> PathBuf {
        match self.sync_dir.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => expand_home(dir),
            _ => home.join(SYNC_DIR_NAME).join("data"),
        }
    }

    /// Working copy of the shared repository
    pub fn repo_dir(&self, home: &Path) -> PathBuf {
        self.data_dir(home).join("repo")
    }

    /// Parent of per-machine staging trees
    pub fn staging_root(&self, home: &Path) -> PathBuf {
        self.data_dir(home).join("staging")
    }

    /// Configured patterns plus the backup names merges leave behind
    pub fn exclude_matcher(&self) -> SyncResult<ExcludePatterns> {
        let patterns: Vec<&str> = self
            .exclude_patterns
            .iter()
            .map(String::as_str)
            .chain(BACKUP_PATTERNS)
            .collect();
        ExcludePatterns::from_patterns(&patterns).map_err(|e| SyncError::config(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> SyncResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
