//! Sync Module
//!
//! Orchestrates pull and push runs.
//!
//! ## Structure
//!
//! - `options` - Run parameters (`Operation`, `SyncOptions`)
//! - `result` - Per-phase and per-item outcomes (`SyncReport`)
//! - `use_case` - Core orchestration (`SyncOrchestrator`)
//!
//! ## Usage
//!
//! ```ignore
//! use claude_sync::application::sync::{Operation, SyncOrchestrator};
//!
//! let orchestrator = SyncOrchestrator::new(&transport, &catalog, &excludes);
//! let report = orchestrator.run(Operation::Both, &options, &events);
//! ```

mod options;
mod result;
mod use_case;

pub use options::{Operation, SyncOptions};
pub use result::{ItemOutcome, PullReport, PushReport, SyncReport};
pub use use_case::SyncOrchestrator;
