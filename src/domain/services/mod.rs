//! Domain Services
//!
//! Pure merge rules, free of I/O.

pub mod config_merge;
pub mod context_merge;

pub use config_merge::{
    merge_assistant_config, merge_config_values, order_like, AssistantConfig, ProjectEntry,
    PRESERVED_KEYS,
};
pub use context_merge::{merge_context, provenance_header, ContextMerge};
