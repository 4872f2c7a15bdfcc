//! claude-sync - synchronize AI assistant configuration and session data
//!
//! Each machine publishes a snapshot of its assistant state into a shared
//! repository under its own machine id, and merges every other machine's
//! snapshot into its live files with item-specific rules: field-aware JSON
//! merging, append-only context merging and mtime-based directory merging.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{MergeEngine, MergeError, MergeResult, Operation, SyncOrchestrator};
pub use config::{Config, SyncMethod};
pub use domain::entities::{ItemCatalog, SyncItem, SyncMetadata};
pub use domain::value_objects::{MachineId, SyncLevel};
pub use error::{SyncError, SyncResult};
