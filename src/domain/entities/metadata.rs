//! Snapshot metadata descriptor (`metadata.json`)
//!
//! Written next to every staged snapshot. `synced_items` is the only list a
//! pulling machine consults to decide what to merge.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{MachineId, SyncLevel};

/// File name of the descriptor inside a machine directory
pub const METADATA_FILE: &str = "metadata.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncMetadata {
    pub machine_id: MachineId,
    pub hostname: String,
    /// ISO-8601 timestamp of the snapshot
    pub timestamp: String,
    #[serde(default)]
    pub sync_level: SyncLevel,
    #[serde(default)]
    pub synced_items: Vec<String>,
}

impl SyncMetadata {
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn lists(&self, item: &str) -> bool {
        self.synced_items.iter().any(|name| name == item)
    }
}
