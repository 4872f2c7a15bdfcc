use crate::ui::terminal::TerminalCapabilities;

/// Output settings for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8) -> Self {
        Self::from_caps(json, verbose, TerminalCapabilities::detect())
    }

    pub(crate) fn from_caps(json: bool, verbose: u8, caps: TerminalCapabilities) -> Self {
        Self {
            json,
            verbose,
            caps,
            color: !json && caps.supports_color && !caps.is_ci,
            unicode: caps.supports_unicode,
        }
    }

    /// Prompts are only offered to a person at a terminal
    pub fn can_prompt(&self) -> bool {
        !self.json && self.caps.stdin_is_tty && self.caps.is_tty && !self.caps.is_ci
    }
}
