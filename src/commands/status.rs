use std::fs;
use std::path::Path;

use anyhow::Result;
use claude_sync::domain::entities::{SyncMetadata, METADATA_FILE};
use claude_sync::domain::value_objects::SyncLevel;

use super::Workspace;
use crate::ui::context::UiContext;
use crate::ui::icon::Icon;

/// A machine directory found in the working copy
struct KnownMachine {
    id: String,
    hostname: Option<String>,
    timestamp: Option<String>,
}

pub fn cmd_status(
    level: Option<SyncLevel>,
    git_repo: Option<&str>,
    ui: &UiContext,
) -> Result<()> {
    let workspace = Workspace::detect()?;
    let config = workspace.effective_config(ui, level, git_repo)?;
    let catalog = workspace.catalog();
    let repo_dir = config.repo_dir(&workspace.home);
    let machines = known_machines(&repo_dir);
    let own_id = config
        .machine_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();

    if ui.json {
        let items: Vec<_> = catalog
            .items_for(config.sync_level)
            .map(|item| {
                serde_json::json!({
                    "name": item.name,
                    "path": item.local_path.display().to_string(),
                    "exists": catalog.source_path(item).is_some(),
                })
            })
            .collect();
        let machines: Vec<_> = machines
            .iter()
            .map(|m| {
                serde_json::json!({
                    "machine_id": m.id,
                    "hostname": m.hostname,
                    "timestamp": m.timestamp,
                })
            })
            .collect();
        crate::ui::json::emit(serde_json::json!({
            "event": "status",
            "config": workspace.config_path.display().to_string(),
            "git_repo": config.git_repo,
            "sync_method": config.sync_method.as_str(),
            "sync_level": config.sync_level.as_str(),
            "machine_id": own_id,
            "items": items,
            "machines": machines,
        }))?;
        return Ok(());
    }

    let repo = if config.git_repo.is_empty() {
        "Not configured"
    } else {
        config.git_repo.as_str()
    };
    println!("claude-sync status");
    println!("Config: {}", workspace.config_path.display());
    println!("Repository: {}", repo);
    println!("Method: {}", config.sync_method.as_str());
    println!("Sync level: {}", config.sync_level);
    println!("Machine ID: {}", own_id);

    println!("\nItems to sync ({}):", config.sync_level);
    for item in catalog.items_for(config.sync_level) {
        let (icon, path) = match catalog.source_path(item) {
            Some(path) => (Icon::Success, path),
            None => (Icon::Error, item.local_path.clone()),
        };
        println!(
            "  {} {}: {}",
            icon.colored(ui.color, ui.unicode),
            item.name,
            path.display()
        );
    }

    if repo_dir.is_dir() {
        println!("\nMachines in {}:", repo_dir.display());
        if machines.is_empty() {
            println!("  (none yet)");
        }
        for machine in &machines {
            let marker = if machine.id == own_id { " (this machine)" } else { "" };
            match (&machine.hostname, &machine.timestamp) {
                (Some(host), Some(ts)) => {
                    println!("  {}{}: {} at {}", machine.id, marker, host, ts)
                }
                _ => println!("  {}{}: no snapshot", machine.id, marker),
            }
        }
    }

    Ok(())
}

fn known_machines(repo_dir: &Path) -> Vec<KnownMachine> {
    let Ok(entries) = fs::read_dir(repo_dir) else {
        return Vec::new();
    };

    let mut machines: Vec<KnownMachine> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| {
            let id = entry.file_name().to_string_lossy().into_owned();
            if id.starts_with('.') {
                return None;
            }
            let metadata = fs::read_to_string(entry.path().join(METADATA_FILE))
                .ok()
                .and_then(|text| SyncMetadata::from_json(&text).ok());
            Some(KnownMachine {
                id,
                hostname: metadata.as_ref().map(|m| m.hostname.clone()),
                timestamp: metadata.map(|m| m.timestamp),
            })
        })
        .collect();
    machines.sort_by(|a, b| a.id.cmp(&b.id));
    machines
}
