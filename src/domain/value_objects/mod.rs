//! Value Objects
//!
//! Immutable domain values with validation.

mod exclude_patterns;
mod machine_id;
mod tier;

pub use exclude_patterns::{ExcludeError, ExcludePatterns};
pub use machine_id::{InvalidMachineId, MachineId};
pub use tier::{SyncLevel, Tier};
