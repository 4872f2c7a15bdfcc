//! Isolated machines for end-to-end tests.
//!
//! Every `TestEnv` has its own temporary home and working directory and runs
//! the real `claude-sync` binary with `CLAUDE_SYNC_HOME` pointing at it, so
//! two environments sharing one `SharedFolder` behave like two machines.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a claude-sync command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON events
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("not JSON: {} ({})", line, e))
            })
            .collect()
    }
}

/// A directory standing in for the shared repository
pub struct SharedFolder {
    pub dir: TempDir,
}

impl SharedFolder {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create shared folder"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Published snapshot directory of one machine
    pub fn machine_dir(&self, machine_id: &str) -> PathBuf {
        self.dir.path().join(machine_id)
    }
}

/// One simulated machine
pub struct TestEnv {
    pub home_dir: TempDir,
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    /// A machine with no configuration yet
    pub fn new() -> Self {
        Self {
            home_dir: TempDir::new().expect("Failed to create home dir"),
            project_root: TempDir::new().expect("Failed to create project dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_claude-sync")),
        }
    }

    /// A machine configured for the folder method against `shared`
    pub fn machine(machine_id: &str, shared: &SharedFolder) -> Self {
        let env = Self::new();
        env.write_config(&serde_json::json!({
            "sync_method": "folder",
            "git_repo": shared.path().display().to_string(),
            "machine_id": machine_id,
            "sync_level": "essential",
        }));
        env
    }

    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.path().join(relative)
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn config_path(&self) -> PathBuf {
        self.home_path(".claude-sync/config.json")
    }

    /// Working copy of the shared repository
    pub fn repo_dir(&self) -> PathBuf {
        self.home_path(".claude-sync/data/repo")
    }

    pub fn write_config(&self, config: &serde_json::Value) {
        let text = serde_json::to_string_pretty(config).expect("Failed to encode config");
        self.write_home_file(".claude-sync/config.json", &text);
    }

    pub fn read_config(&self) -> serde_json::Value {
        let text = std::fs::read_to_string(self.config_path()).expect("Failed to read config");
        serde_json::from_str(&text).expect("config is not JSON")
    }

    pub fn write_home_file(&self, relative: &str, content: &str) {
        write_file(&self.home_path(relative), content);
    }

    pub fn read_home_file(&self, relative: &str) -> String {
        let path = self.home_path(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    pub fn write_project_file(&self, relative: &str, content: &str) {
        write_file(&self.project_path(relative), content);
    }

    /// Run claude-sync from the working directory
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run claude-sync with extra environment variables
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("CLAUDE_SYNC_HOME", self.home_dir.path())
            .env("HOME", self.home_dir.path())
            .env("NO_COLOR", "1")
            .env("CI", "1")
            .env_remove("CLAUDE_SYNC_CONFIG_PATH")
            .env_remove("CLAUDE_SYNC_LEVEL")
            .env_remove("CLAUDE_SYNC_REPO");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute claude-sync");
        output_to_result(output)
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
