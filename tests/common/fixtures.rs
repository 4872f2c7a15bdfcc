//! Reusable file contents.

pub const MACHINE_A: &str = "aaaa1111";
pub const MACHINE_B: &str = "bbbb2222";

/// Assistant config of machine A
pub const CONFIG_A: &str = r#"{
  "userID": "user-a",
  "oauthAccount": {"email": "a@example.com"},
  "theme": "dark",
  "projects": {
    "/work/api": {"mcpServers": {"github": {"command": "gh-mcp"}}, "history": ["a"]}
  }
}"#;

/// Assistant config of machine B
pub const CONFIG_B: &str = r#"{
  "userID": "user-b",
  "theme": "light",
  "projects": {
    "/work/api": {"mcpServers": {"postgres": {"command": "pg-mcp"}}, "history": ["b"]},
    "/work/web": {"mcpServers": {}}
  }
}"#;

pub const NOTES_A: &str = "# Notes\n\nPrefer cargo nextest.\n";
pub const NOTES_B: &str = "# Notes\n\nRun clippy before pushing.\n";
