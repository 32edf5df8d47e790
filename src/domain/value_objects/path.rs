//! Safe Path Value Object
//!
//! A validated relative path:
//! - No path traversal (`..`)
//! - Not absolute
//! - Non-empty
//!
//! Manifest keys and asset paths come from disk and are validated with this
//! before they are ever joined to the destination root.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Error when path validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path contains traversal components (..)
    ContainsTraversal,
    /// Path is absolute when relative is required
    AbsoluteNotAllowed,
    /// Path is empty
    Empty,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::ContainsTraversal => write!(f, "path contains traversal components (..)"),
            PathError::AbsoluteNotAllowed => write!(f, "absolute paths are not allowed"),
            PathError::Empty => write!(f, "path is empty"),
        }
    }
}

impl std::error::Error for PathError {}

/// A validated safe relative path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SafePath(PathBuf);

impl SafePath {
    /// Create a new SafePath after validation
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        if path.as_os_str().is_empty() {
            return Err(PathError::Empty);
        }

        // `/x` is not absolute on Windows but still roots the join
        if path.is_absolute() || path.has_root() {
            return Err(PathError::AbsoluteNotAllowed);
        }

        for component in path.components() {
            match component {
                Component::ParentDir => return Err(PathError::ContainsTraversal),
                Component::Prefix(_) | Component::RootDir => {
                    return Err(PathError::AbsoluteNotAllowed)
                }
                _ => {}
            }
        }

        Ok(Self(path.to_path_buf()))
    }

    /// Join onto a root directory
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for SafePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for SafePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Join `rel` onto `base` lexically, refusing results that leave `root`.
///
/// Works on paths that may not exist, so no canonicalization is involved.
pub fn join_within(root: &Path, base: &Path, rel: &str) -> Option<PathBuf> {
    let rel = Path::new(rel);
    if rel.is_absolute() || rel.has_root() {
        return None;
    }

    let mut out = base.to_path_buf();
    for component in rel.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::Normal(part) => out.push(part),
            Component::Prefix(_) | Component::RootDir => return None,
        }
    }

    if out.starts_with(root) && out != root {
        Some(out)
    } else {
        None
    }
}
