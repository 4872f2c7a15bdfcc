//! What the attached terminal can show.

use is_terminal::IsTerminal;

/// Variables set by common CI services
const CI_VARS: [&str; 5] = ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "BUILDKITE", "JENKINS_HOME"];

/// Locale variables in lookup precedence
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalCapabilities {
    /// stdout is a terminal
    pub is_tty: bool,
    pub stdin_is_tty: bool,
    pub supports_color: bool,
    pub supports_unicode: bool,
    pub is_ci: bool,
}

impl TerminalCapabilities {
    /// Inspect the real process environment and standard streams.
    pub fn detect() -> Self {
        Self::from_env(
            |key| std::env::var(key).ok(),
            std::io::stdout().is_terminal(),
            std::io::stdin().is_terminal(),
        )
    }

    fn from_env(var: impl Fn(&str) -> Option<String>, is_tty: bool, stdin_is_tty: bool) -> Self {
        let dumb = var("TERM").is_some_and(|term| term.eq_ignore_ascii_case("dumb"));
        let no_color = var("NO_COLOR").is_some_and(|v| !v.is_empty());

        // The first locale variable that is set decides; none set means UTF-8
        let unicode_locale = LOCALE_VARS
            .iter()
            .find_map(|key| var(key))
            .map(|locale| !matches!(locale.to_ascii_lowercase().as_str(), "c" | "posix"))
            .unwrap_or(true);

        Self {
            is_tty,
            stdin_is_tty,
            supports_color: is_tty && !dumb && !no_color,
            supports_unicode: !dumb && unicode_locale,
            is_ci: CI_VARS.iter().any(|key| var(key).is_some()),
        }
    }
}
