//! Transport Implementations
//!
//! Concrete implementations of the TransportProvider port:
//! - GitTransport: git remote via the `git` command line
//! - FolderTransport: shared directory

mod folder;
mod git;

pub use folder::{resolve_location, FolderTransport};
pub use git::GitTransport;
