use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use claude_sync::infrastructure::fs::sync_home_dir;

use crate::ui::context::UiContext;
use crate::ui::icon::Icon;

/// Hook directory relative to home
const HOOKS_DIR: [&str; 2] = [".claude-code", "hooks"];

pub fn cmd_hooks(ui: &UiContext) -> Result<()> {
    let home = sync_home_dir().context("cannot determine the home directory")?;
    let exe = std::env::current_exe().context("cannot locate the claude-sync executable")?;
    let hooks_dir = HOOKS_DIR.iter().fold(home, |dir, part| dir.join(part));

    let installed = install_hooks(&hooks_dir, &exe)
        .with_context(|| format!("failed to install hooks into {}", hooks_dir.display()))?;

    if ui.json {
        crate::ui::json::emit(serde_json::json!({
            "event": "complete",
            "command": "hooks",
            "hooks": installed
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
        }))?;
        return Ok(());
    }

    println!(
        "{} Hooks installed in {}",
        Icon::Success.colored(ui.color, ui.unicode),
        hooks_dir.display()
    );
    println!("Context will sync automatically on session start/end");
    Ok(())
}

/// Write the session hooks, returning their paths.
fn install_hooks(hooks_dir: &Path, exe: &Path) -> std::io::Result<Vec<PathBuf>> {
    fs::create_dir_all(hooks_dir)?;

    let hooks = [
        ("session-start.sh", "Pull other machines' changes at session start", "pull"),
        ("session-end.sh", "Push this machine's snapshot at session end", "push"),
    ];

    let mut written = Vec::new();
    for (file_name, description, action) in hooks {
        let path = hooks_dir.join(file_name);
        fs::write(&path, hook_script(description, exe, action))?;
        make_executable(&path)?;
        written.push(path);
    }
    Ok(written)
}

fn hook_script(description: &str, exe: &Path, action: &str) -> String {
    format!(
        "#!/bin/bash\n# {}\ncd ~\n{} {}\n",
        description,
        shell_quote(&exe.display().to_string()),
        action
    )
}

/// Single-quote for bash; an embedded `'` becomes `'\''`.
fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "'\\''"))
}

#[cfg(unix)]
fn make_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
