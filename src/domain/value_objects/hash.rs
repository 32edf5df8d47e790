//! Content hash value object
//!
//! The watcher uses it to drop change notifications whose bytes did not change
//! (editors rewrite files on focus loss, sync clients touch timestamps).

use std::fmt;

use sha2::{Digest, Sha256};

/// SHA-256 digest rendered as `sha256:<hex>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentHash(String);

impl ContentHash {
    pub const PREFIX: &'static str = "sha256:";

    /// Hash raw bytes (documents and images alike)
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(format!("{}{:x}", Self::PREFIX, Sha256::digest(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex digest without the prefix
    pub fn hex(&self) -> &str {
        self.0.strip_prefix(Self::PREFIX).unwrap_or(&self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_is_prefixed_sha256() {
        let hash = ContentHash::from_bytes(b"hello");
        assert!(hash.as_str().starts_with("sha256:"));
        assert_eq!(hash.hex().len(), 64);
        assert_eq!(
            hash.hex(),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn equal_bytes_equal_hash() {
        assert_eq!(ContentHash::from_bytes(b"a"), ContentHash::from_bytes(b"a"));
        assert_ne!(ContentHash::from_bytes(b"a"), ContentHash::from_bytes(b"b"));
    }
}
