// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Durable persistence for the dispatch queue.
//!
//! On suspend the queue snapshot is written under a fixed logical key; on
//! resume it is read back and re-enqueued. The capability is deliberately
//! total: a failed save reports `false`, a failed load reports `None`, and
//! the engine degrades to "nothing restored" rather than surfacing an error.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Fixed logical key the queue snapshot is persisted under.
pub const QUEUE_STORAGE_KEY: &str = "_tealium_queue";

/// Key-value persistence capability for queue snapshots.
pub trait QueueStore {
    /// Persists the payload sequence under `key`. Returns whether the write
    /// succeeded.
    fn save(&self, items: &[String], key: &str) -> bool;

    /// Loads the payload sequence stored under `key`, or `None` if absent
    /// or unreadable.
    fn load(&self, key: &str) -> Option<Vec<String>>;
}

/// File-backed store: one JSON array file per key inside a directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at the given directory. The directory is
    /// created on the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        JsonFileStore { dir: dir.into() }
    }

    /// Creates a store under the platform's local data directory
    /// (`<data_local_dir>/beacon`), falling back to the current directory
    /// when the platform reports no such location.
    pub fn default_location() -> Self {
        let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        JsonFileStore::new(base.join("beacon"))
    }

    /// The file a key maps to.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn write(&self, path: &Path, items: &[String]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string(items)?;
        fs::write(path, json)?;
        Ok(())
    }

    fn read(&self, path: &Path) -> Result<Vec<String>> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl QueueStore for JsonFileStore {
    fn save(&self, items: &[String], key: &str) -> bool {
        let path = self.path_for(key);
        match self.write(&path, items) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("failed to persist queue to {}: {}", path.display(), e);
                false
            }
        }
    }

    fn load(&self, key: &str) -> Option<Vec<String>> {
        let path = self.path_for(key);
        match self.read(&path) {
            Ok(items) => Some(items),
            Err(Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("failed to read persisted queue {}: {}", path.display(), e);
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "storage_tests.rs"]
mod tests;
