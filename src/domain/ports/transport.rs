//! Transport Port
//!
//! Abstracts the mechanism that moves the shared repository between machines
//! (git remote, shared folder). The orchestrator drives it; the merge engine
//! never sees it.

use std::path::Path;

/// Diagnostic output of a successful transport call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportOutput {
    pub diagnostics: String,
}

impl TransportOutput {
    pub fn new(diagnostics: impl Into<String>) -> Self {
        Self {
            diagnostics: diagnostics.into(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Error during transport operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The underlying tool could not be started at all
    #[error("{operation} unavailable: {message}")]
    Unavailable {
        operation: &'static str,
        message: String,
    },
    /// The operation ran and reported failure
    #[error("{operation} failed: {message}")]
    CommandFailed {
        operation: &'static str,
        message: String,
    },
}

impl TransportError {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Unavailable { operation, .. } | Self::CommandFailed { operation, .. } => {
                operation
            }
        }
    }
}

pub type TransportResult = Result<TransportOutput, TransportError>;

/// Capability interface for repository transports
///
/// All calls block until the underlying operation completes.
pub trait TransportProvider {
    /// Short name for status output ("git", "folder")
    fn name(&self) -> &'static str;

    /// Materialize the remote at `url` into `dest` (which must not exist)
    fn clone_repo(&self, url: &str, dest: &Path) -> TransportResult;

    /// Bring the working copy at `cwd` up to date with the remote
    fn pull(&self, cwd: &Path) -> TransportResult;

    /// Stage every change in the working copy
    fn add(&self, cwd: &Path) -> TransportResult;

    /// Record staged changes; "nothing to commit" may be reported as an error
    fn commit(&self, cwd: &Path, message: &str) -> TransportResult;

    /// Publish the working copy to the remote
    fn push(&self, cwd: &Path) -> TransportResult;
}
