use anyhow::Result;
use claude_sync::application::sync::{Operation, SyncOptions, SyncOrchestrator, SyncReport};
use claude_sync::domain::value_objects::SyncLevel;
use claude_sync::infrastructure::identity::current_hostname;

use super::{event_sink, transport_for, Workspace};
use crate::ui::context::UiContext;
use crate::ui::icon::Icon;

pub fn cmd_sync(
    operation: Operation,
    level: Option<SyncLevel>,
    git_repo: Option<&str>,
    ui: &UiContext,
) -> Result<()> {
    let workspace = Workspace::detect()?;
    let config = workspace.effective_config(ui, level, git_repo)?;

    let repo_url = config.require_repo()?.to_string();
    let machine_id = config.require_machine_id()?.clone();
    let excludes = config.exclude_matcher()?;
    let catalog = workspace.catalog();
    let transport = transport_for(&config, &machine_id)?;

    let options = SyncOptions {
        machine_id,
        hostname: current_hostname(),
        repo_url,
        repo_dir: config.repo_dir(&workspace.home),
        staging_root: config.staging_root(&workspace.home),
        level: config.sync_level,
    };

    let events = event_sink(ui);
    let report = SyncOrchestrator::new(transport.as_ref(), &catalog, &excludes).run(
        operation,
        &options,
        events.as_ref(),
    );

    if ui.json {
        crate::ui::json::emit(summary_json(operation, &report))?;
    } else {
        print_summary(operation, &report, ui);
    }

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

fn command_name(operation: Operation) -> &'static str {
    match operation {
        Operation::Pull => "pull",
        Operation::Push => "push",
        Operation::Both => "sync",
    }
}

fn summary_json(operation: Operation, report: &SyncReport) -> serde_json::Value {
    let pull = report.pull.as_ref().map(|outcome| match outcome {
        Ok(pull) => serde_json::json!({
            "success": true,
            "machines": pull.machines,
            "changed": pull.changed_items(),
            "failed": pull.failed_items().count(),
            "warnings": pull.warnings,
        }),
        Err(e) => serde_json::json!({ "success": false, "error": e.to_string() }),
    });
    let push = report.push.as_ref().map(|outcome| match outcome {
        Ok(push) => serde_json::json!({
            "success": true,
            "staged": push.staged,
            "committed": push.committed,
            "message": push.commit_message,
        }),
        Err(e) => serde_json::json!({ "success": false, "error": e.to_string() }),
    });

    serde_json::json!({
        "event": "complete",
        "command": command_name(operation),
        "success": report.is_success(),
        "pull": pull,
        "push": push,
    })
}

fn print_summary(operation: Operation, report: &SyncReport, ui: &UiContext) {
    println!();
    if let Some(Ok(pull)) = &report.pull {
        let failed = pull.failed_items().count();
        println!(
            "Pulled from {} machine(s): {} item(s) updated, {} failed",
            pull.machines.len(),
            pull.changed_items(),
            failed
        );
    }
    if let Some(Ok(push)) = &report.push {
        println!("Pushed {} item(s)", push.staged.len());
    }

    let title = match operation {
        Operation::Pull => "Pull",
        Operation::Push => "Push",
        Operation::Both => "Sync",
    };
    if report.is_success() {
        println!("{} {} completed", Icon::Success.colored(ui.color, ui.unicode), title);
    } else {
        eprintln!(
            "{} {} finished with errors",
            Icon::Error.colored(ui.color, ui.unicode),
            title
        );
    }
}
