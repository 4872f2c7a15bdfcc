//! Status glyphs with an ASCII fallback.

use crossterm::style::{Color, Stylize};

use crate::ui::theme::{colors, icons, icons_ascii};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Progress,
    Skipped,
    Arrow,
}

impl Icon {
    /// (unicode, ascii) glyphs
    fn glyphs(self) -> (&'static str, &'static str) {
        match self {
            Icon::Success => (icons::SUCCESS, icons_ascii::SUCCESS),
            Icon::Error => (icons::ERROR, icons_ascii::ERROR),
            Icon::Warning => (icons::WARNING, icons_ascii::WARNING),
            Icon::Progress => (icons::PROGRESS, icons_ascii::PROGRESS),
            Icon::Skipped => (icons::SKIPPED, icons_ascii::SKIPPED),
            Icon::Arrow => (icons::ARROW, icons_ascii::ARROW),
        }
    }

    fn color(self) -> Color {
        match self {
            Icon::Success => colors::SUCCESS,
            Icon::Error => colors::ERROR,
            Icon::Warning => colors::WARNING,
            Icon::Progress => colors::INFO,
            Icon::Skipped | Icon::Arrow => colors::DIM,
        }
    }

    pub fn render(self, unicode: bool) -> &'static str {
        let (fancy, plain) = self.glyphs();
        if unicode {
            fancy
        } else {
            plain
        }
    }

    pub fn colored(self, color: bool, unicode: bool) -> String {
        let glyph = self.render(unicode);
        if color {
            glyph.with(self.color()).to_string()
        } else {
            glyph.to_string()
        }
    }
}
