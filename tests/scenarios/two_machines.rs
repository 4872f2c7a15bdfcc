//! Scenario: Two Machines Sharing One Folder
//!
//! Journey: a developer works on a laptop (A) and a desktop (B).
//!
//! Steps:
//! 1. A pushes its config, notes, todos and sessions
//! 2. B pulls: config merged, notes appended, todos and sessions copied
//! 3. B pulls again: nothing changes
//! 4. B syncs, then A pulls B's notes back
//!
//! Success Criteria:
//! - Identity keys never travel between machines
//! - Overwritten notes leave a backup
//! - Repeated pulls are no-ops

use std::fs;

use serde_json::{json, Value};

use crate::common::fixtures::{CONFIG_A, CONFIG_B, MACHINE_A, MACHINE_B, NOTES_A, NOTES_B};
use crate::common::*;

fn read_json(env: &TestEnv, relative: &str) -> Value {
    serde_json::from_str(&env.read_home_file(relative)).unwrap()
}

fn laptop(shared: &SharedFolder) -> TestEnv {
    let a = TestEnv::machine(MACHINE_A, shared);
    a.write_home_file(".claude.json", CONFIG_A);
    a.write_home_file(".claude/CLAUDE.md", NOTES_A);
    a.write_home_file(".claude/todos/t1.json", "[\"ship it\"]");
    a.write_home_file(".claude/projects/api/s1.jsonl", "{\"from\":\"a\"}\n");
    a
}

fn desktop(shared: &SharedFolder) -> TestEnv {
    let b = TestEnv::machine(MACHINE_B, shared);
    b.write_home_file(".claude.json", CONFIG_B);
    b.write_home_file(".claude/CLAUDE.md", NOTES_B);
    b.write_home_file(".claude/projects/api/s2.jsonl", "{\"from\":\"b\"}\n");
    b
}

/// SCENARIO: B receives A's state
#[test]
fn scenario_second_machine_pulls_first() {
    let shared = SharedFolder::new();
    let a = laptop(&shared);
    let b = desktop(&shared);

    let pushed = a.run(&["push"]);
    assert!(pushed.is_success(), "{}", pushed.combined_output());

    let pulled = b.run(&["pull"]);
    assert!(pulled.is_success(), "{}", pulled.combined_output());
    assert!(pulled.stdout.contains("Pulled from 1 machine(s)"));

    // Config: identity stays, servers union, shared keys from remote
    let config = read_json(&b, ".claude.json");
    assert_eq!(config["userID"], "user-b");
    assert!(config.get("oauthAccount").is_none());
    assert_eq!(config["theme"], "dark");
    assert_eq!(
        config["projects"]["/work/api"]["mcpServers"],
        json!({"github": {"command": "gh-mcp"}, "postgres": {"command": "pg-mcp"}})
    );
    assert_eq!(config["projects"]["/work/api"]["history"], json!(["b"]));
    assert!(config["projects"].get("/work/web").is_some());

    // Notes: appended under a provenance header, original backed up
    let notes = b.read_home_file(".claude/CLAUDE.md");
    assert!(notes.starts_with(NOTES_B));
    assert!(notes.contains(&format!("# Merged from {}", MACHINE_A)));
    assert!(notes.contains("Prefer cargo nextest."));
    assert_eq!(b.read_home_file(".claude/CLAUDE.md.bak"), NOTES_B);

    // Directories: new files arrive, local ones stay
    assert_eq!(b.read_home_file(".claude/todos/t1.json"), "[\"ship it\"]");
    assert!(b.home_path(".claude/projects/api/s1.jsonl").is_file());
    assert!(b.home_path(".claude/projects/api/s2.jsonl").is_file());
}

/// SCENARIO: pulling twice changes nothing the second time
#[test]
fn scenario_repeated_pull_is_a_noop() {
    let shared = SharedFolder::new();
    let a = laptop(&shared);
    let b = desktop(&shared);
    assert!(a.run(&["push"]).is_success());
    assert!(b.run(&["pull"]).is_success());
    let notes = b.read_home_file(".claude/CLAUDE.md");
    let config = b.read_home_file(".claude.json");

    let again = b.run(&["pull"]);

    assert!(again.is_success(), "{}", again.combined_output());
    assert!(again.stdout.contains("0 item(s) updated"), "{}", again.stdout);
    assert_eq!(b.read_home_file(".claude/CLAUDE.md"), notes);
    assert_eq!(b.read_home_file(".claude.json"), config);
    assert!(!b.home_path(".claude/CLAUDE.md.bak.1").exists());
}

/// SCENARIO: changes flow back to the first machine
#[test]
fn scenario_round_trip_between_machines() {
    let shared = SharedFolder::new();
    let a = laptop(&shared);
    let b = desktop(&shared);
    assert!(a.run(&["push"]).is_success());

    let synced = b.run(&["sync"]);
    assert!(synced.is_success(), "{}", synced.combined_output());
    assert!(shared.machine_dir(MACHINE_B).join("metadata.json").is_file());

    let pulled = a.run(&["pull"]);
    assert!(pulled.is_success(), "{}", pulled.combined_output());

    let notes = a.read_home_file(".claude/CLAUDE.md");
    assert!(notes.starts_with(NOTES_A));
    assert!(notes.contains(&format!("# Merged from {}", MACHINE_B)));
    assert!(notes.contains("Run clippy before pushing."));
    assert!(a.home_path(".claude/projects/api/s2.jsonl").is_file());
    assert_eq!(read_json(&a, ".claude.json")["userID"], "user-a");
    assert_eq!(
        read_json(&a, ".claude.json")["oauthAccount"]["email"],
        "a@example.com"
    );

    // A's own snapshot is never merged back into A
    assert!(!a.home_path(".claude/CLAUDE.md.bak.1").exists());
}

/// SCENARIO: a backup left next to a merged file never travels
#[test]
fn scenario_backups_stay_local() {
    let shared = SharedFolder::new();
    let a = laptop(&shared);
    let b = desktop(&shared);
    assert!(a.run(&["push"]).is_success());
    assert!(b.run(&["sync"]).is_success());

    let published = shared.machine_dir(MACHINE_B);
    assert!(published.join("context_file").is_file());
    let names: Vec<String> = walk(&published)
        .into_iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    assert!(names.iter().all(|n| !n.contains(".bak")), "{:?}", names);
}

fn walk(root: &std::path::Path) -> Vec<std::path::PathBuf> {
    let mut out = Vec::new();
    for entry in fs::read_dir(root).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            out.extend(walk(&path));
        } else {
            out.push(path);
        }
    }
    out
}
