//! Command implementations for the `claude-sync` binary

mod hooks;
mod setup;
mod status;
mod sync;

pub use hooks::cmd_hooks;
pub use setup::cmd_setup;
pub use status::cmd_status;
pub use sync::cmd_sync;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use claude_sync::config::{config_path, load_or_create, with_env_overrides, Config, SyncMethod};
use claude_sync::domain::entities::ItemCatalog;
use claude_sync::domain::ports::{SyncEventSink, TransportProvider};
use claude_sync::domain::value_objects::{MachineId, SyncLevel};
use claude_sync::infrastructure::fs::sync_home_dir;
use claude_sync::infrastructure::identity::derive_machine_id;
use claude_sync::infrastructure::{FolderTransport, GitTransport, JsonEventSink};

use crate::ui::console::ConsoleEventSink;
use crate::ui::context::UiContext;
use crate::ui::output::print_config_warnings;

/// Paths every command resolves first
pub(crate) struct Workspace {
    pub home: PathBuf,
    pub cwd: PathBuf,
    pub config_path: PathBuf,
}

impl Workspace {
    pub fn detect() -> Result<Self> {
        let home = sync_home_dir().context("cannot determine the home directory")?;
        let cwd = std::env::current_dir().context("cannot determine the working directory")?;
        Ok(Self {
            config_path: config_path(&home),
            home,
            cwd,
        })
    }

    pub fn catalog(&self) -> ItemCatalog {
        ItemCatalog::standard(&self.home, &self.cwd)
    }

    /// Stored configuration, created with a fresh machine id on first use
    pub fn stored_config(&self, ui: &UiContext) -> Result<Config> {
        let (config, warnings) = load_or_create(&self.config_path, derive_machine_id)
            .with_context(|| format!("failed to load {}", self.config_path.display()))?;
        print_config_warnings(&self.config_path, &warnings, ui);
        Ok(config)
    }

    /// Stored configuration with environment and command-line overrides
    pub fn effective_config(
        &self,
        ui: &UiContext,
        level: Option<SyncLevel>,
        git_repo: Option<&str>,
    ) -> Result<Config> {
        let mut config = with_env_overrides(self.stored_config(ui)?);
        if let Some(level) = level {
            config.sync_level = level;
        }
        if let Some(repo) = git_repo.map(str::trim).filter(|r| !r.is_empty()) {
            config.git_repo = repo.to_string();
        }
        Ok(config)
    }
}

pub(crate) fn transport_for(
    config: &Config,
    machine_id: &MachineId,
) -> Result<Box<dyn TransportProvider>> {
    match config.sync_method {
        SyncMethod::Git => {
            let git = GitTransport::new();
            if !git.is_available() {
                bail!("git is not installed or not on PATH (or set sync_method to \"folder\")");
            }
            Ok(Box::new(git))
        }
        SyncMethod::Folder => Ok(Box::new(FolderTransport::new(
            config.git_repo.trim(),
            machine_id.clone(),
        ))),
    }
}

pub(crate) fn event_sink(ui: &UiContext) -> Box<dyn SyncEventSink> {
    if ui.json {
        Box::new(JsonEventSink::stdout())
    } else {
        Box::new(ConsoleEventSink::new(*ui))
    }
}
