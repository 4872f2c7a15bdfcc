use anyhow::{bail, Result};
use claude_sync::config::{save, SyncMethod};
use claude_sync::domain::value_objects::SyncLevel;
use dialoguer::Input;

use super::Workspace;
use crate::ui::context::UiContext;
use crate::ui::icon::Icon;
use crate::ui::theme::prompt_theme;

pub fn cmd_setup(
    method: Option<SyncMethod>,
    level: Option<SyncLevel>,
    git_repo: Option<&str>,
    ui: &UiContext,
) -> Result<()> {
    let workspace = Workspace::detect()?;
    let mut config = workspace.stored_config(ui)?;

    let repo = match git_repo.map(str::trim).filter(|r| !r.is_empty()) {
        Some(repo) => repo.to_string(),
        None if ui.can_prompt() => prompt_repo(ui, &config.git_repo)?,
        None => bail!("--git-repo <url> is required for setup"),
    };

    config.git_repo = repo;
    if let Some(level) = level {
        config.sync_level = level;
    }
    if let Some(method) = method {
        config.sync_method = method;
    }
    save(&workspace.config_path, &config)?;

    let machine_id = config
        .machine_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_default();

    if ui.json {
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "setup",
            "config": workspace.config_path.display().to_string(),
            "git_repo": config.git_repo,
            "sync_method": config.sync_method.as_str(),
            "sync_level": config.sync_level.as_str(),
            "machine_id": machine_id,
        }))?;
        return Ok(());
    }

    println!(
        "{} Configuration saved to {}",
        Icon::Success.colored(ui.color, ui.unicode),
        workspace.config_path.display()
    );
    println!("Repository: {}", config.git_repo);
    println!("Method: {}", config.sync_method.as_str());
    println!("Sync level: {}", config.sync_level);
    println!("Machine ID: {}", machine_id);
    Ok(())
}

fn prompt_repo(ui: &UiContext, current: &str) -> Result<String> {
    let theme = prompt_theme(ui.color);
    let mut input = Input::<String>::with_theme(theme.as_ref())
        .with_prompt("Repository URL (or shared folder)");
    if !current.is_empty() {
        input = input.default(current.to_string());
    }
    let repo = input.interact_text()?;
    let repo = repo.trim();
    if repo.is_empty() {
        bail!("a repository is required");
    }
    Ok(repo.to_string())
}
