//! Persistence port for scores and session progress
//!
//! The simulation records progress through a narrow key/value trait so
//! tests run on an in-memory map while the binary persists a JSON file.
//! Store failures are logged and swallowed; a broken disk must never
//! stall a frame.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

/// Well-known keys written by the game session.
pub mod keys {
    /// Best score of the current install, shown in the sidebar.
    pub const HIGH_SCORE: &str = "high_score";
    /// Monotonic all-time best, never lowered.
    pub const CUMULATIVE_HIGH_SCORE: &str = "cumulative_high_score";
    pub const LAST_SCORE: &str = "last_score";
    pub const LAST_LEVEL: &str = "last_level";
    pub const LAST_LINES: &str = "last_lines";
}

pub trait ScoreStore {
    /// Read a value; absent keys are `None` and read as 0 by callers.
    fn get_int(&self, key: &str) -> Option<i64>;

    /// Write a value. Implementations log failures instead of returning
    /// them.
    fn set_int(&mut self, key: &str, value: i64);
}

/// Volatile store for tests and `--store none`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.values.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.values.insert(key.to_string(), value);
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    values: BTreeMap<String, i64>,
}

/// File-backed store, written back on every set.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    file: StoreFile,
}

impl JsonFileStore {
    /// Open a store at `path`. A missing file starts empty; a malformed
    /// one is an error so a corrupt save is not silently truncated.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("malformed score store {}", path.display()))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreFile::default(),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("reading score store {}", path.display()))
            }
        };
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        let write = || -> Result<()> {
            let text = serde_json::to_string_pretty(&self.file)?;
            fs::write(&self.path, text)?;
            Ok(())
        };
        if let Err(err) = write() {
            warn!("score store write to {} failed: {err:#}", self.path.display());
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn get_int(&self, key: &str) -> Option<i64> {
        self.file.values.get(key).copied()
    }

    fn set_int(&mut self, key: &str, value: i64) {
        self.file.values.insert(key.to_string(), value);
        self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get_int(keys::HIGH_SCORE), None);
        store.set_int(keys::HIGH_SCORE, 1200);
        assert_eq!(store.get_int(keys::HIGH_SCORE), Some(1200));
        store.set_int(keys::HIGH_SCORE, 40);
        assert_eq!(store.get_int(keys::HIGH_SCORE), Some(40));
    }

    #[test]
    fn json_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set_int(keys::LAST_SCORE, 777);
            store.set_int(keys::LAST_LEVEL, 3);
        }
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get_int(keys::LAST_SCORE), Some(777));
        assert_eq!(store.get_int(keys::LAST_LEVEL), Some(3));
        assert_eq!(store.get_int(keys::LAST_LINES), None);
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nope.json")).unwrap();
        assert_eq!(store.get_int(keys::HIGH_SCORE), None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(JsonFileStore::open(&path).is_err());
    }
}
