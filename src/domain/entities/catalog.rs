//! Item catalog
//!
//! Maps logical item names to local paths for the current machine. Built once
//! per invocation from the home and working directories, then passed to every
//! component that needs it.

use std::path::{Path, PathBuf};

use super::sync_item::{ItemKind, MergeStrategy, SyncItem};
use crate::domain::value_objects::{SyncLevel, Tier};

/// Name of the context document item
pub const CONTEXT_ITEM: &str = "context_file";

/// File name of the context document
pub const CONTEXT_FILE_NAME: &str = "CLAUDE.md";

/// The set of items this machine knows how to sync
#[derive(Debug, Clone)]
pub struct ItemCatalog {
    items: Vec<SyncItem>,
    working_dir: PathBuf,
}

impl ItemCatalog {
    /// Build a catalog from explicit items.
    pub fn new(items: Vec<SyncItem>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            items,
            working_dir: working_dir.into(),
        }
    }

    /// The standard catalog for the assistant's data layout under `home`.
    pub fn standard(home: &Path, working_dir: &Path) -> Self {
        use ItemKind::*;
        use MergeStrategy::*;
        use Tier::*;

        let items = vec![
            SyncItem::new(
                "claude_config",
                home.join(".claude.json"),
                Essential,
                File,
                StructuredConfig,
            ),
            SyncItem::new(
                "claude_settings",
                home.join(".claude/settings.local.json"),
                Essential,
                File,
                PlainFile,
            ),
            SyncItem::new(
                CONTEXT_ITEM,
                home.join(".claude").join(CONTEXT_FILE_NAME),
                Essential,
                SpecialContextFile,
                AppendText,
            ),
            SyncItem::new(
                "session_data",
                home.join(".claude/projects"),
                Essential,
                Directory,
                AppendDirectory,
            ),
            SyncItem::new(
                "todos",
                home.join(".claude/todos"),
                Essential,
                Directory,
                UpdateDirectory,
            ),
            SyncItem::new(
                "shell_snapshots",
                home.join(".claude/shell-snapshots"),
                Optional,
                Directory,
                UpdateDirectory,
            ),
            SyncItem::new(
                "slash_commands",
                home.join(".claude-code/slash-commands"),
                Optional,
                Directory,
                UpdateDirectory,
            ),
        ];

        Self::new(items, working_dir)
    }

    pub fn items(&self) -> &[SyncItem] {
        &self.items
    }

    pub fn get(&self, name: &str) -> Option<&SyncItem> {
        self.items.iter().find(|item| item.name == name)
    }

    /// Items taking part at `level`, in catalog order
    pub fn items_for(&self, level: SyncLevel) -> impl Iterator<Item = &SyncItem> {
        self.items
            .iter()
            .filter(move |item| level.includes(item.tier))
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Working-directory fallback for the context document
    pub fn fallback_path(&self, item: &SyncItem) -> Option<PathBuf> {
        (item.kind == ItemKind::SpecialContextFile)
            .then(|| self.working_dir.join(CONTEXT_FILE_NAME))
    }

    /// Path to read the live item from when staging.
    ///
    /// Returns `None` when neither the catalog path nor the fallback exists.
    pub fn source_path(&self, item: &SyncItem) -> Option<PathBuf> {
        if item.local_path.exists() {
            return Some(item.local_path.clone());
        }
        self.fallback_path(item).filter(|p| p.is_file())
    }

    /// Path a remote copy of the item is merged into.
    ///
    /// The context document prefers the catalog path, then an existing
    /// working-directory copy, and otherwise creates the catalog path.
    pub fn destination_path(&self, item: &SyncItem) -> PathBuf {
        if item.kind == ItemKind::SpecialContextFile && !item.local_path.exists() {
            if let Some(fallback) = self.fallback_path(item).filter(|p| p.is_file()) {
                return fallback;
            }
        }
        item.local_path.clone()
    }
}
