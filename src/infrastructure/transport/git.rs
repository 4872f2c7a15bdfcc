//! Git transport
//!
//! Drives the `git` command line in a subprocess. Each call blocks until git
//! exits and has no timeout.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::domain::ports::{TransportError, TransportOutput, TransportProvider, TransportResult};

/// Transport backed by a git remote
#[derive(Debug, Clone)]
pub struct GitTransport {
    program: String,
}

impl Default for GitTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl GitTransport {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Use a different git executable (e.g. a wrapper script)
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Check if git is available
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn run(&self, operation: &'static str, args: &[&str], cwd: Option<&Path>) -> TransportResult {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).stdin(Stdio::null());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| TransportError::Unavailable {
            operation,
            message: format!("could not run {}: {}", self.program, e),
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            let mut diagnostics = stdout.trim().to_string();
            if !stderr.trim().is_empty() {
                if !diagnostics.is_empty() {
                    diagnostics.push('\n');
                }
                diagnostics.push_str(stderr.trim());
            }
            return Ok(TransportOutput::new(diagnostics));
        }

        // git reports "nothing to commit" on stdout
        let message = if stderr.trim().is_empty() {
            stdout.trim().to_string()
        } else {
            stderr.trim().to_string()
        };
        Err(TransportError::CommandFailed { operation, message })
    }
}

impl TransportProvider for GitTransport {
    fn name(&self) -> &'static str {
        "git"
    }

    fn clone_repo(&self, url: &str, dest: &Path) -> TransportResult {
        let dest = dest.to_string_lossy();
        // `--` keeps a URL starting with '-' from being read as an option
        self.run("clone", &["clone", "--", url, dest.as_ref()], None)
    }

    fn pull(&self, cwd: &Path) -> TransportResult {
        self.run("pull", &["pull", "--rebase"], Some(cwd))
    }

    fn add(&self, cwd: &Path) -> TransportResult {
        self.run("add", &["add", "--all", "."], Some(cwd))
    }

    fn commit(&self, cwd: &Path, message: &str) -> TransportResult {
        self.run("commit", &["commit", "-m", message], Some(cwd))
    }

    fn push(&self, cwd: &Path) -> TransportResult {
        self.run("push", &["push"], Some(cwd))
    }
}
