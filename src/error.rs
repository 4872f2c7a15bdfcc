//! Error types for claude-sync
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::TransportError;

/// Result type alias for claude-sync operations
pub type SyncResult<T> = Result<T, SyncError>;

/// Main error type for claude-sync operations
#[derive(Error, Debug)]
pub enum SyncError {
    /// Missing or invalid configuration, reported before any I/O happens
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Clone/pull/push/commit failure
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Staging area could not be prepared
    #[error("failed to prepare staging area {path}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Working copy could not be updated with the staged snapshot
    #[error("failed to publish snapshot into {path}: {source}")]
    Publish {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SyncError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
