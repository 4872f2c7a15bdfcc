//! Infrastructure Layer
//!
//! Concrete implementations of domain ports plus local filesystem and
//! identity helpers.

pub mod events;
pub mod fs;
pub mod identity;
pub mod transport;

pub use events::JsonEventSink;
pub use transport::{FolderTransport, GitTransport};
