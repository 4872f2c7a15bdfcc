//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod sync_events;
pub mod transport;

pub use sync_events::{NoopEventSink, Phase, SyncEvent, SyncEventSink};
pub use transport::{TransportError, TransportOutput, TransportProvider, TransportResult};
