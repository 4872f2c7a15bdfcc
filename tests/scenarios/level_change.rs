//! Scenario: Changing the Sync Level
//!
//! Journey: a developer tries the full level, then goes back to essential.
//!
//! Steps:
//! 1. A pushes at the full level: optional items are published
//! 2. B pulls and receives them
//! 3. A pushes at the essential level: optional items disappear remotely
//!
//! Success Criteria:
//! - A snapshot only ever holds the items of its level
//! - metadata.json lists exactly what was published

use std::fs;

use serde_json::Value;

use crate::common::fixtures::{MACHINE_A, MACHINE_B};
use crate::common::*;

fn metadata(shared: &SharedFolder, machine: &str) -> Value {
    let text = fs::read_to_string(shared.machine_dir(machine).join("metadata.json")).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn listed(metadata: &Value, item: &str) -> bool {
    metadata["synced_items"]
        .as_array()
        .unwrap()
        .iter()
        .any(|name| name == item)
}

/// SCENARIO: full, then essential
#[test]
fn scenario_full_then_essential() {
    let shared = SharedFolder::new();
    let a = TestEnv::machine(MACHINE_A, &shared);
    let b = TestEnv::machine(MACHINE_B, &shared);
    a.write_home_file(".claude.json", "{}");
    a.write_home_file(".claude/shell-snapshots/snapshot-zsh.sh", "export A=1\n");
    a.write_home_file(".claude-code/slash-commands/review.md", "Review the diff\n");

    let full = a.run(&["push", "--level", "full"]);
    assert!(full.is_success(), "{}", full.combined_output());
    let published = metadata(&shared, MACHINE_A);
    assert_eq!(published["sync_level"], "full");
    assert!(listed(&published, "shell_snapshots"));
    assert!(listed(&published, "slash_commands"));
    assert!(shared
        .machine_dir(MACHINE_A)
        .join("shell_snapshots/snapshot-zsh.sh")
        .is_file());

    // Items listed by the remote are applied whatever the local level
    let pulled = b.run(&["pull"]);
    assert!(pulled.is_success(), "{}", pulled.combined_output());
    assert_eq!(
        b.read_home_file(".claude-code/slash-commands/review.md"),
        "Review the diff\n"
    );

    let essential = a.run(&["push"]);
    assert!(essential.is_success(), "{}", essential.combined_output());
    let published = metadata(&shared, MACHINE_A);
    assert_eq!(published["sync_level"], "essential");
    assert!(!listed(&published, "shell_snapshots"));
    assert!(!shared.machine_dir(MACHINE_A).join("shell_snapshots").exists());
    assert!(!shared.machine_dir(MACHINE_A).join("slash_commands").exists());
    assert!(shared.machine_dir(MACHINE_A).join("claude_config").is_file());
}

/// SCENARIO: a missing item is a warning, not a failure
#[test]
fn scenario_missing_items_do_not_block_push() {
    let shared = SharedFolder::new();
    let a = TestEnv::machine(MACHINE_A, &shared);

    let result = a.run(&["push", "--level", "full"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result.stderr.contains("not found"), "{}", result.stderr);
    let published = metadata(&shared, MACHINE_A);
    assert_eq!(published["synced_items"], serde_json::json!([]));
}
