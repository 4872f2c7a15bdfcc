use claude_sync::config::SyncMethod;
use claude_sync::domain::value_objects::SyncLevel;
use clap::{Parser, Subcommand};

/// claude-sync - keep assistant configuration and sessions in step across machines
#[derive(Parser, Debug)]
#[command(name = "claude-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v shows transport output and quiet skips)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Which items to sync
    #[arg(long, value_enum, global = true)]
    pub level: Option<SyncLevel>,

    /// Repository URL (or shared folder for the folder method)
    #[arg(long, global = true)]
    pub git_repo: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save the repository and level, generating this machine's id
    Setup {
        /// Transport used to reach the repository
        #[arg(long, value_enum)]
        method: Option<SyncMethod>,
    },

    /// Pull from other machines, then push this machine
    Sync,

    /// Merge other machines' snapshots into local state
    Pull,

    /// Publish this machine's snapshot
    Push,

    /// Show configuration and what would be synced
    Status,

    /// Install session hooks that pull on start and push on end
    Hooks,
}
