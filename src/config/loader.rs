//! Configuration loading and persistence

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{MachineId, SyncLevel};
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::fs::atomic_write;

use super::types::{Config, SYNC_DIR_NAME};

/// Overrides the configuration file location
pub const CONFIG_PATH_VAR: &str = "CLAUDE_SYNC_CONFIG_PATH";
/// Overrides `sync_level`
pub const LEVEL_VAR: &str = "CLAUDE_SYNC_LEVEL";
/// Overrides `git_repo`
pub const REPO_VAR: &str = "CLAUDE_SYNC_REPO";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Location of the configuration file
pub fn config_path(home: &Path) -> PathBuf {
    std::env::var_os(CONFIG_PATH_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| home.join(SYNC_DIR_NAME).join("config.json"))
}

/// Parse configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> SyncResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(path, &content)
}

pub(super) fn parse_with_warnings(
    path: &Path,
    content: &str,
) -> SyncResult<(Config, Vec<ConfigWarning>)> {
    let invalid = |e: serde_json::Error| SyncError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut unknown_paths: Vec<String> = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(content);
    let config: Config = serde_ignored::deserialize(&mut deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(invalid)?;
    deserializer.end().map_err(invalid)?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &format!("\"{}\"", key)),
                suggestion: suggest_key(&key),
                file: path.to_path_buf(),
                key,
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load the configuration, creating it with defaults on first use.
///
/// A configuration without `machine_id` gets one derived via `derive_id` and
/// is written back, so the id stays stable across invocations.
pub fn load_or_create(
    path: &Path,
    derive_id: impl FnOnce() -> MachineId,
) -> SyncResult<(Config, Vec<ConfigWarning>)> {
    if !path.exists() {
        let config = Config::for_machine(derive_id());
        save(path, &config)?;
        return Ok((config, Vec::new()));
    }

    let (mut config, warnings) = load_with_warnings(path)?;
    if config.machine_id.is_none() {
        config.machine_id = Some(derive_id());
        save(path, &config)?;
    }
    Ok((config, warnings))
}

/// Write the configuration atomically as pretty JSON.
pub fn save(path: &Path, config: &Config) -> SyncResult<()> {
    let mut content = config.to_json_pretty()?;
    content.push('\n');
    atomic_write(path, content.as_bytes())?;
    Ok(())
}

/// Apply environment variable overrides (CLAUDE_SYNC_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub(super) fn apply_overrides(
    mut config: Config,
    get_env: impl Fn(&str) -> Option<String>,
) -> Config {
    if let Some(level) = get_env(LEVEL_VAR).and_then(|v| SyncLevel::parse(&v)) {
        config.sync_level = level;
    }

    if let Some(repo) = get_env(REPO_VAR).filter(|v| !v.trim().is_empty()) {
        config.git_repo = repo.trim().to_string();
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "sync_method",
        "git_repo",
        "machine_id",
        "sync_level",
        "exclude_patterns",
        "sync_dir",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
