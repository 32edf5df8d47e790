//! Ignore patterns value object
//!
//! Loads `.mirrorignore` from the source root and matches documents against it
//! using gitignore semantics.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Name of the ignore file at the source root
pub const IGNORE_FILE_NAME: &str = ".mirrorignore";

/// Maximum file size for the ignore file (64KB)
const MAX_FILE_SIZE: u64 = 65536;

/// Maximum number of patterns allowed
const MAX_PATTERNS: usize = 1000;

/// Patterns loaded from the source root's ignore file.
#[derive(Debug)]
pub struct IgnorePatterns {
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePatterns {
    /// Create an empty pattern set (matches nothing).
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// Load patterns from the ignore file in `source_root`.
    ///
    /// A missing file yields an empty set.
    pub fn load(source_root: &Path) -> Result<Self, IgnoreError> {
        let ignore_path = source_root.join(IGNORE_FILE_NAME);

        if !ignore_path.exists() {
            return Ok(Self::empty());
        }

        let metadata = fs::metadata(&ignore_path).map_err(IgnoreError::Io)?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(IgnoreError::FileTooLarge {
                path: ignore_path,
                size: metadata.len(),
                limit: MAX_FILE_SIZE,
            });
        }

        let content = fs::read_to_string(&ignore_path).map_err(IgnoreError::Io)?;
        Self::from_content(source_root, &ignore_path, &content)
    }

    /// Parse patterns from string content.
    pub fn from_content(
        root: &Path,
        source_path: &Path,
        content: &str,
    ) -> Result<Self, IgnoreError> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for (line_num, line) in content.lines().enumerate() {
            let trimmed = line.trim();

            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if pattern_count > MAX_PATTERNS {
                return Err(IgnoreError::TooManyPatterns {
                    path: source_path.to_path_buf(),
                    count: pattern_count,
                    limit: MAX_PATTERNS,
                });
            }

            if let Err(e) = builder.add_line(Some(source_path.to_path_buf()), line) {
                return Err(IgnoreError::InvalidPattern {
                    path: source_path.to_path_buf(),
                    line: line_num + 1,
                    pattern: line.to_string(),
                    message: e.to_string(),
                });
            }
        }

        let matcher = builder
            .build()
            .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;

        Ok(Self {
            matcher,
            pattern_count,
        })
    }

    /// Check whether a root-relative path is ignored.
    pub fn is_ignored(&self, rel_path: &Path, is_dir: bool) -> bool {
        self.matcher
            .matched_path_or_any_parents(rel_path, is_dir)
            .is_ignore()
    }

    /// Get the number of patterns loaded.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Check if this is an empty pattern set.
    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}

/// Errors that can occur when loading ignore patterns.
#[derive(Debug, Error)]
pub enum IgnoreError {
    #[error("{} exceeds {}KB limit ({size} bytes)", path.display(), limit / 1024)]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },
    #[error("{} has {count} patterns, exceeds {limit} limit", path.display())]
    TooManyPatterns {
        path: PathBuf,
        count: usize,
        limit: usize,
    },
    #[error("invalid pattern at {}:{line}: '{pattern}' - {message}", path.display())]
    InvalidPattern {
        path: PathBuf,
        line: usize,
        pattern: String,
        message: String,
    },
    #[error("failed to build ignore matcher: {0}")]
    BuildFailed(String),
    #[error("IO error reading ignore file: {0}")]
    Io(#[source] std::io::Error),
}
