//! claude-sync CLI - keep assistant configuration and sessions in step across machines
//!
//! Usage: claude-sync <COMMAND>
//!
//! Commands:
//!   setup   Save the repository and level
//!   sync    Pull, then push
//!   pull    Merge other machines' snapshots into local state
//!   push    Publish this machine's snapshot
//!   status  Show configuration and what would be synced
//!   hooks   Install session hooks

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;

use claude_sync::application::sync::Operation;
use cli::{Cli, Commands};
use ui::context::UiContext;

fn main() {
    let cli = Cli::parse();
    let ui = UiContext::new(cli.json, cli.verbose);

    if let Err(e) = run(cli, &ui) {
        if ui.json {
            let _ = ui::json::emit(serde_json::json!({
                "event": "error",
                "message": format!("{:#}", e),
            }));
        } else {
            eprintln!("{} {:#}", ui::icon::Icon::Error.colored(ui.color, ui.unicode), e);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, ui: &UiContext) -> Result<()> {
    let level = cli.level;
    let git_repo = cli.git_repo.as_deref();

    match cli.command {
        Commands::Setup { method } => commands::cmd_setup(method, level, git_repo, ui),
        Commands::Sync => commands::cmd_sync(Operation::Both, level, git_repo, ui),
        Commands::Pull => commands::cmd_sync(Operation::Pull, level, git_repo, ui),
        Commands::Push => commands::cmd_sync(Operation::Push, level, git_repo, ui),
        Commands::Status => commands::cmd_status(level, git_repo, ui),
        Commands::Hooks => commands::cmd_hooks(ui),
    }
}
