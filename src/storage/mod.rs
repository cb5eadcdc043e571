//! Durable string-keyed storage.
//!
//! Everything the client persists locally (credentials, session token,
//! profile fields) lives in a flat string-to-string store: a single
//! JSON object file under the platform data directory, loaded into
//! memory on open and written through on every mutation.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read storage: {0}")]
    ReadFailure(String),

    #[error("Failed to write storage: {0}")]
    WriteFailure(String),
}

/// String-keyed write-through store backed by a JSON file.
///
/// A missing key is a normal state, not an error; only actual I/O or
/// parse problems surface as [`StorageError`]. Callers treat those as
/// non-fatal: log, notify, continue.
pub struct KvStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl KvStore {
    /// Open the store at `path`, loading existing entries if the file
    /// is present. A missing file starts an empty store.
    pub fn open(path: PathBuf) -> Result<Self, StorageError> {
        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)
                .map_err(|e| StorageError::ReadFailure(e.to_string()))?;
            serde_json::from_str(&contents)
                .map_err(|e| StorageError::ReadFailure(e.to_string()))?
        } else {
            HashMap::new()
        };

        debug!(?path, count = entries.len(), "Storage opened");
        Ok(Self { path, entries })
    }

    /// Start an empty store at `path`, ignoring any existing file until
    /// the next write. Used as a fallback when the file is unreadable.
    pub fn empty(path: PathBuf) -> Self {
        Self {
            path,
            entries: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    /// Remove a key. Removing a key that is not present is a no-op.
    pub fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()
        } else {
            Ok(())
        }
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::WriteFailure(e.to_string()))?;
        }
        let contents = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| StorageError::WriteFailure(e.to_string()))?;
        fs::write(&self.path, contents).map_err(|e| StorageError::WriteFailure(e.to_string()))
    }
}
