//! `claude-sync sync|pull|push` against a shared folder

mod common;

use common::fixtures::{CONFIG_A, MACHINE_A, MACHINE_B, NOTES_A};
use common::*;

#[test]
fn pull_without_repo_is_a_config_error() {
    let env = TestEnv::new();

    let result = env.run(&["pull"]);

    assert_eq!(result.exit_code, 1);
    assert!(
        result.stderr.contains("no repository configured"),
        "{}",
        result.stderr
    );
}

#[test]
fn repo_from_environment_is_used() {
    let shared = SharedFolder::new();
    let env = TestEnv::new();
    env.write_config(&serde_json::json!({
        "sync_method": "folder",
        "machine_id": MACHINE_A,
    }));
    env.write_home_file(".claude.json", "{}");

    let repo = shared.path().display().to_string();
    let result = env.run_with_env(&["push"], &[("CLAUDE_SYNC_REPO", repo.as_str())]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(shared.machine_dir(MACHINE_A).join("claude_config").is_file());
}

#[test]
fn push_publishes_snapshot_with_metadata() {
    let shared = SharedFolder::new();
    let env = TestEnv::machine(MACHINE_A, &shared);
    env.write_home_file(".claude.json", CONFIG_A);
    env.write_home_file(".claude/CLAUDE.md", NOTES_A);
    env.write_home_file(".claude/todos/t1.json", "[]");

    let result = env.run(&["push"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result.stdout.contains("Pushed 3 item(s)"));

    let published = shared.machine_dir(MACHINE_A);
    let metadata: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(published.join("metadata.json")).unwrap())
            .unwrap();
    assert_eq!(metadata["machine_id"], MACHINE_A);
    assert_eq!(metadata["sync_level"], "essential");
    assert_eq!(
        metadata["synced_items"],
        serde_json::json!(["claude_config", "context_file", "todos"])
    );
    assert!(chrono::DateTime::parse_from_rfc3339(metadata["timestamp"].as_str().unwrap()).is_ok());
    assert_eq!(
        std::fs::read_to_string(published.join("context_file")).unwrap(),
        NOTES_A
    );
    assert!(published.join("todos/t1.json").is_file());
}

#[test]
fn push_leaves_out_excluded_files() {
    let shared = SharedFolder::new();
    let env = TestEnv::machine(MACHINE_A, &shared);
    env.write_home_file(".claude/todos/t1.json", "[]");
    env.write_home_file(".claude/todos/debug.log", "noise");
    env.write_home_file(".claude/todos/t1.json.bak", "old");

    let result = env.run(&["push"]);

    assert!(result.is_success(), "{}", result.combined_output());
    let todos = shared.machine_dir(MACHINE_A).join("todos");
    assert!(todos.join("t1.json").is_file());
    assert!(!todos.join("debug.log").exists());
    assert!(!todos.join("t1.json.bak").exists());
}

#[test]
fn pull_with_empty_shared_folder_succeeds() {
    let shared = SharedFolder::new();
    let env = TestEnv::machine(MACHINE_A, &shared);

    let result = env.run(&["pull"]);

    assert!(result.is_success(), "{}", result.combined_output());
    assert!(result.stdout.contains("Pulled from 0 machine(s)"));
    assert!(env.repo_dir().is_dir());
}

#[test]
fn sync_json_emits_events_then_summary() {
    let shared = SharedFolder::new();
    let env = TestEnv::machine(MACHINE_A, &shared);
    env.write_home_file(".claude.json", "{}");

    let result = env.run(&["sync", "--json"]);

    assert!(result.is_success(), "{}", result.combined_output());
    let events = result.json_lines();
    assert!(events.len() > 2);
    let summary = events.last().unwrap();
    assert_eq!(summary["event"], "complete");
    assert_eq!(summary["command"], "sync");
    assert_eq!(summary["success"], true);
    assert_eq!(summary["pull"]["success"], true);
    assert_eq!(summary["push"]["staged"], serde_json::json!(["claude_config"]));
    assert!(summary["push"]["message"]
        .as_str()
        .unwrap()
        .starts_with(&format!("Sync from {} at ", MACHINE_A)));
}

#[test]
fn failed_item_makes_pull_exit_non_zero() {
    let shared = SharedFolder::new();
    let a = TestEnv::machine(MACHINE_A, &shared);
    let b = TestEnv::machine(MACHINE_B, &shared);
    a.write_home_file(".claude/settings.local.json", "{\"model\":\"opus\"}");
    assert!(a.run(&["push"]).is_success());
    std::fs::create_dir_all(b.home_path(".claude/settings.local.json")).unwrap();

    let result = b.run(&["pull"]);

    assert_eq!(result.exit_code, 1, "{}", result.combined_output());
    assert!(result.stderr.contains("claude_settings"));
}
