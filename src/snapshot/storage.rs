use super::types::Snapshot;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Default snapshot file name, relative to the working directory
pub const DEFAULT_SNAPSHOT_FILE: &str = "issues.json";

/// Single-file cache of the fetched items
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_FILE)
    }
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read and parse the whole snapshot file
    pub fn load(&self) -> Result<Snapshot> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open snapshot file at {}", self.path.display()))?;

        let snapshot: Snapshot = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse snapshot file at {}", self.path.display()))?;

        Ok(snapshot)
    }

    /// Replace the snapshot file with `snapshot`, as compact JSON.
    ///
    /// The write goes through atomic-write-file, so a failed save leaves the
    /// previous file untouched.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }

        let mut file = AtomicWriteFile::open(&self.path)
            .with_context(|| format!("Failed to open atomic write file at {}", self.path.display()))?;

        serde_json::to_writer(&mut file, snapshot).context("Failed to serialize snapshot")?;

        file.commit()
            .with_context(|| format!("Failed to write snapshot file at {}", self.path.display()))?;

        Ok(())
    }
}
