//! Application Layer
//!
//! Use cases combining the domain rules with infrastructure: staging this
//! machine's snapshot, merging foreign snapshots, and sequencing both around
//! the transport.

pub mod merge;
pub mod staging;
pub mod sync;

pub use merge::{MergeEngine, MergeError, MergeResult};
pub use staging::{StageWarning, StagingBuilder, StagingTree};
pub use sync::{
    ItemOutcome, Operation, PullReport, PushReport, SyncOptions, SyncOrchestrator, SyncReport,
};
