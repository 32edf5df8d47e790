//! Common test utilities for notemirror integration tests.
//!
//! - `Workspace`: a temp dir holding a vault, a site content root and state
//! - `CountingFs`: `LocalFs` wrapper that counts mutating calls
//! - `FailingFs`: `LocalFs` wrapper that fails one kind of call on one file
//! - `run_cli`: run the notemirror binary in isolation

#![allow(dead_code)]

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, SystemTime};

use notemirror::domain::ports::{DirEntry, FileSystem, FsError, FsResult};
use notemirror::{EnginePaths, LocalFs, SyncOptions};
use tempfile::TempDir;

/// Frontmatter header that marks a document publishable
pub fn published(body: &str) -> String {
    format!("---\n可发布: true\n---\n{body}")
}

/// Same document without the marker
pub fn draft(body: &str) -> String {
    format!("---\ntitle: draft\n---\n{body}")
}

/// Isolated vault + site + state layout
pub struct Workspace {
    pub root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("Failed to create temp dir");
        std::fs::create_dir_all(root.path().join("vault/image")).unwrap();
        std::fs::create_dir_all(root.path().join("site/content")).unwrap();
        Self { root }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn source(&self) -> PathBuf {
        self.path("vault")
    }

    pub fn destination(&self) -> PathBuf {
        self.path("site/content")
    }

    pub fn manifest(&self) -> PathBuf {
        self.path("state/manifest.json")
    }

    pub fn options(&self) -> SyncOptions {
        SyncOptions::new(EnginePaths {
            source: self.source(),
            destination: self.destination(),
            manifest: self.manifest(),
        })
    }

    /// Write a file below the vault
    pub fn write_source(&self, relative: &str, content: &str) {
        write_file(&self.source().join(relative), content);
    }

    /// Write a file below the site content root
    pub fn write_dest(&self, relative: &str, content: &str) {
        write_file(&self.destination().join(relative), content);
    }

    pub fn remove_source(&self, relative: &str) {
        std::fs::remove_file(self.source().join(relative)).unwrap();
    }

    /// Bump a source file's mtime so the next run sees it as updated
    pub fn touch_source(&self, relative: &str) {
        let later = SystemTime::now() + Duration::from_secs(120);
        std::fs::File::options()
            .write(true)
            .open(self.source().join(relative))
            .unwrap()
            .set_modified(later)
            .unwrap();
    }

    pub fn read_dest(&self, relative: &str) -> String {
        let path = self.destination().join(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e))
    }

    pub fn dest_exists(&self, relative: &str) -> bool {
        self.destination().join(relative).exists()
    }

    pub fn read_manifest(&self) -> String {
        std::fs::read_to_string(self.manifest()).unwrap_or_default()
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// `LocalFs` that counts every call that mutates disk
#[derive(Default)]
pub struct CountingFs {
    inner: LocalFs,
    writes: Cell<usize>,
    copies: Cell<usize>,
    removals: Cell<usize>,
}

impl CountingFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn copies(&self) -> usize {
        self.copies.get()
    }

    pub fn removals(&self) -> usize {
        self.removals.get()
    }

    pub fn mutations(&self) -> usize {
        self.writes() + self.copies() + self.removals()
    }
}

impl FileSystem for CountingFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.inner.read(path)
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.writes.set(self.writes.get() + 1);
        self.inner.write(path, content)
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        self.copies.set(self.copies.get() + 1);
        self.inner.copy(from, to)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        self.removals.set(self.removals.get() + 1);
        self.inner.remove(path)
    }

    fn remove_dir_if_empty(&self, path: &Path) -> FsResult<bool> {
        let removed = self.inner.remove_dir_if_empty(path)?;
        if removed {
            self.removals.set(self.removals.get() + 1);
        }
        Ok(removed)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        self.inner.create_dir_all(path)
    }

    fn read_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        self.inner.read_dir(path)
    }

    fn modified_ms(&self, path: &Path) -> FsResult<i64> {
        self.inner.modified_ms(path)
    }

    fn canonicalize(&self, path: &Path) -> FsResult<PathBuf> {
        self.inner.canonicalize(path)
    }
}

/// Disk call that `FailingFs` refuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailOn {
    Write,
    Copy,
    Remove,
}

/// `LocalFs` that fails `op` on any path whose file name is `name`.
/// Writes and copies fail with permission denied, removals with a plain
/// I/O error.
pub struct FailingFs {
    inner: LocalFs,
    op: FailOn,
    name: String,
}

impl FailingFs {
    pub fn new(op: FailOn, name: &str) -> Self {
        Self {
            inner: LocalFs::new(),
            op,
            name: name.to_string(),
        }
    }

    fn check(&self, op: FailOn, path: &Path) -> FsResult<()> {
        let hit = op == self.op && path.file_name().is_some_and(|n| n == self.name.as_str());
        if !hit {
            return Ok(());
        }
        Err(match op {
            FailOn::Remove => FsError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::other("device busy"),
            },
            FailOn::Write | FailOn::Copy => FsError::PermissionDenied(path.to_path_buf()),
        })
    }
}

impl FileSystem for FailingFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.inner.read(path)
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.check(FailOn::Write, path)?;
        self.inner.write(path, content)
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        self.check(FailOn::Copy, to)?;
        self.inner.copy(from, to)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.inner.is_file(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.inner.is_dir(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        self.check(FailOn::Remove, path)?;
        self.inner.remove(path)
    }

    fn remove_dir_if_empty(&self, path: &Path) -> FsResult<bool> {
        self.inner.remove_dir_if_empty(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        self.inner.create_dir_all(path)
    }

    fn read_dir(&self, path: &Path) -> FsResult<Vec<DirEntry>> {
        self.inner.read_dir(path)
    }

    fn modified_ms(&self, path: &Path) -> FsResult<i64> {
        self.inner.modified_ms(path)
    }

    fn canonicalize(&self, path: &Path) -> FsResult<PathBuf> {
        self.inner.canonicalize(path)
    }
}

/// Result of running the notemirror binary
#[derive(Debug)]
pub struct CliResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Run notemirror from `cwd` with the user config dir pointed at `config_home`
/// and every `NOTEMIRROR_*` override cleared.
pub fn run_cli(cwd: &Path, config_home: &Path, args: &[&str]) -> CliResult {
    let output = Command::new(env!("CARGO_BIN_EXE_notemirror"))
        .current_dir(cwd)
        .args(args)
        .env("NOTEMIRROR_CONFIG_HOME", config_home)
        .env_remove("NOTEMIRROR_SOURCE")
        .env_remove("NOTEMIRROR_DESTINATION")
        .env_remove("NOTEMIRROR_MANIFEST")
        .env_remove("NOTEMIRROR_DEBOUNCE_MS")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute notemirror");

    CliResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
