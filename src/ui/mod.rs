//! Terminal output for the `claude-sync` binary

pub mod console;
pub mod context;
pub mod icon;
pub mod json;
pub mod output;
pub mod terminal;
pub mod theme;
