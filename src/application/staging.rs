//! Staging Builder
//!
//! Copies this machine's live items into `<staging_root>/<machine_id>` and
//! writes the `metadata.json` descriptor. The tree is rebuilt from scratch on
//! every push, so it only ever holds the items of the current level.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::domain::entities::{ItemCatalog, SyncItem, SyncMetadata, METADATA_FILE};
use crate::domain::ports::{SyncEvent, SyncEventSink};
use crate::domain::value_objects::{ExcludePatterns, MachineId, SyncLevel};
use crate::error::{SyncError, SyncResult};
use crate::infrastructure::fs::{atomic_write, copy_file_preserving, copy_tree, remove_path};

/// An item that could not be staged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageWarning {
    pub item: String,
    pub message: String,
}

/// A freshly built snapshot of this machine
#[derive(Debug, Clone)]
pub struct StagingTree {
    pub root: PathBuf,
    pub metadata: SyncMetadata,
    pub warnings: Vec<StageWarning>,
}

pub struct StagingBuilder<'a> {
    catalog: &'a ItemCatalog,
    excludes: &'a ExcludePatterns,
    staging_root: PathBuf,
}

impl<'a> StagingBuilder<'a> {
    pub fn new(
        catalog: &'a ItemCatalog,
        excludes: &'a ExcludePatterns,
        staging_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            catalog,
            excludes,
            staging_root: staging_root.into(),
        }
    }

    /// Build the staging tree for `level`.
    ///
    /// Per-item problems become warnings; only failing to prepare the tree
    /// itself or to write the descriptor is an error.
    pub fn stage(
        &self,
        level: SyncLevel,
        machine_id: &MachineId,
        hostname: &str,
        events: &dyn SyncEventSink,
    ) -> SyncResult<StagingTree> {
        let root = self.staging_root.join(machine_id.as_str());
        remove_path(&root)
            .and_then(|_| fs::create_dir_all(&root))
            .map_err(|source| SyncError::Staging {
                path: root.clone(),
                source,
            })?;

        let mut synced_items = Vec::new();
        let mut warnings = Vec::new();

        for item in self.catalog.items_for(level) {
            match self.stage_item(item, &root) {
                Ok(source) => {
                    events.on_event(SyncEvent::ItemStaged {
                        item: item.name.clone(),
                        source,
                    });
                    synced_items.push(item.name.clone());
                }
                Err(message) => {
                    events.on_event(SyncEvent::ItemStageWarning {
                        item: item.name.clone(),
                        message: message.clone(),
                    });
                    warnings.push(StageWarning {
                        item: item.name.clone(),
                        message,
                    });
                }
            }
        }

        let metadata = SyncMetadata {
            machine_id: machine_id.clone(),
            hostname: hostname.to_string(),
            timestamp: Utc::now().to_rfc3339(),
            sync_level: level,
            synced_items,
        };
        let descriptor = root.join(METADATA_FILE);
        atomic_write(&descriptor, metadata.to_json_pretty()?.as_bytes()).map_err(|source| {
            SyncError::Staging {
                path: descriptor.clone(),
                source,
            }
        })?;

        Ok(StagingTree {
            root,
            metadata,
            warnings,
        })
    }

    /// Copy one item into the tree, returning the path it was read from.
    fn stage_item(&self, item: &SyncItem, root: &Path) -> Result<PathBuf, String> {
        let source = self
            .catalog
            .source_path(item)
            .ok_or_else(|| format!("not found: {}", item.local_path.display()))?;
        let dest = root.join(&item.name);

        let copied = if source.is_dir() {
            if !item.kind.is_directory() {
                return Err(format!("{} is a directory", source.display()));
            }
            copy_tree(&source, &dest, self.excludes).map(|_| ())
        } else {
            if item.kind.is_directory() {
                return Err(format!("{} is not a directory", source.display()));
            }
            copy_file_preserving(&source, &dest).map(|_| ())
        };

        match copied {
            Ok(()) => Ok(source),
            Err(e) => {
                // Leave no partial entry behind for an item that is not listed
                let _ = remove_path(&dest);
                Err(format!("failed to copy {}: {}", source.display(), e))
            }
        }
    }
}
