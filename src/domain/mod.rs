//! Domain Layer
//!
//! Sync items, the catalog, merge rules and the ports the application layer
//! drives. Nothing here performs I/O except catalog existence checks.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
