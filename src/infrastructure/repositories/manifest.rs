//! JSON Manifest Repository
//!
//! Implements the ManifestRepository port. The manifest is pretty-printed so
//! it diffs cleanly under version control.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{Manifest, ManifestEntry};
use crate::domain::ports::file_system::FileSystem;
use crate::domain::ports::manifest_repository::{ManifestError, ManifestRepository, ManifestResult};
use crate::infrastructure::fs::LocalFs;

/// JSON-based manifest repository
pub struct JsonManifestRepository {
    fs: LocalFs,
}

impl JsonManifestRepository {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for JsonManifestRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// On-disk representation of one document entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonFileEntry {
    mtime_ms: i64,
    #[serde(default)]
    assets: Vec<String>,
}

/// On-disk representation of the manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonManifest {
    version: u32,
    #[serde(default)]
    files: BTreeMap<String, JsonFileEntry>,
}

/// Render a manifest exactly as it is stored.
pub fn to_json_string(manifest: &Manifest) -> serde_json::Result<String> {
    let files = manifest
        .entries()
        .map(|(key, entry)| {
            (
                key.to_string(),
                JsonFileEntry {
                    mtime_ms: entry.mtime_ms(),
                    assets: entry.assets().to_vec(),
                },
            )
        })
        .collect();

    let mut content = serde_json::to_string_pretty(&JsonManifest {
        version: manifest.version(),
        files,
    })?;
    content.push('\n');
    Ok(content)
}

impl ManifestRepository for JsonManifestRepository {
    fn load(&self, path: &Path) -> ManifestResult<Manifest> {
        if !self.fs.is_file(path) {
            return Ok(Manifest::new());
        }

        let content = self.fs.read(path).map_err(|e| ManifestError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let parsed: JsonManifest =
            serde_json::from_str(&content).map_err(|e| ManifestError::Corrupt {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if parsed.version != Manifest::VERSION {
            return Err(ManifestError::VersionMismatch {
                found: parsed.version,
                expected: Manifest::VERSION,
            });
        }

        let mut manifest = Manifest::new();
        for (key, entry) in parsed.files {
            manifest.set(key, ManifestEntry::new(entry.mtime_ms, entry.assets));
        }
        Ok(manifest)
    }

    fn save(&self, manifest: &Manifest, path: &Path) -> ManifestResult<()> {
        let content = to_json_string(manifest).map_err(|e| ManifestError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.fs
            .write(path, &content)
            .map_err(|e| ManifestError::Write {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
    }
}
