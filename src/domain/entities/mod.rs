//! Domain Entities

mod catalog;
mod metadata;
mod sync_item;

pub use catalog::{ItemCatalog, CONTEXT_FILE_NAME, CONTEXT_ITEM};
pub use metadata::{SyncMetadata, METADATA_FILE};
pub use sync_item::{ItemKind, MergeStrategy, SyncItem};
