//! Exclude patterns value object
//!
//! Matches the configured `exclude_patterns` against paths inside a staged
//! directory item, using gitignore semantics.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fmt;
use std::path::Path;

/// Maximum number of patterns allowed
const MAX_PATTERNS: usize = 1000;

/// Compiled exclude patterns.
///
/// Paths are matched relative to the root of the item being staged.
#[derive(Debug)]
pub struct ExcludePatterns {
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for ExcludePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl ExcludePatterns {
    /// Create an empty pattern set (matches nothing).
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// Compile patterns from the configuration list.
    ///
    /// Blank entries and `#` comments are ignored.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ExcludeError> {
        let mut builder = GitignoreBuilder::new("");
        let mut pattern_count = 0;

        for (index, pattern) in patterns.iter().enumerate() {
            let trimmed = pattern.as_ref().trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if pattern_count > MAX_PATTERNS {
                return Err(ExcludeError::TooManyPatterns {
                    count: pattern_count,
                    limit: MAX_PATTERNS,
                });
            }

            builder
                .add_line(None, trimmed)
                .map_err(|e| ExcludeError::InvalidPattern {
                    index,
                    pattern: trimmed.to_string(),
                    message: e.to_string(),
                })?;
        }

        let matcher = builder
            .build()
            .map_err(|e| ExcludeError::BuildFailed(e.to_string()))?;

        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// Check if a path (relative to the item root) should be excluded.
    pub fn is_excluded(&self, rel_path: &Path, is_dir: bool) -> bool {
        if self.pattern_count == 0 {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}

/// Errors that can occur when compiling exclude patterns.
#[derive(Debug)]
pub enum ExcludeError {
    TooManyPatterns { count: usize, limit: usize },
    InvalidPattern {
        index: usize,
        pattern: String,
        message: String,
    },
    BuildFailed(String),
}

impl fmt::Display for ExcludeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyPatterns { count, limit } => {
                write!(f, "{} exclude patterns, exceeds {} limit", count, limit)
            }
            Self::InvalidPattern {
                index,
                pattern,
                message,
            } => write!(
                f,
                "invalid exclude pattern #{}: '{}' - {}",
                index + 1,
                pattern,
                message
            ),
            Self::BuildFailed(msg) => write!(f, "failed to build exclude matcher: {}", msg),
        }
    }
}

impl std::error::Error for ExcludeError {}
