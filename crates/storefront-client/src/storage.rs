//! # Local Storage
//!
//! A tiny persisted string key/value store, used for the seller's
//! selected collection (`collectionId`).
//!
//! ## File Format
//! ```text
//! local_storage.json
//! {
//!   "collectionId": "64f1c2..."
//! }
//! ```
//!
//! Every `set`/`remove` rewrites the whole file, and the in-memory map
//! only changes once that write succeeded. An in-memory store behaves
//! the same without touching the disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};

/// Key holding the collection selected for product upload.
pub const COLLECTION_ID_KEY: &str = "collectionId";

pub struct LocalStorage {
    path: Option<PathBuf>,
    entries: Mutex<BTreeMap<String, String>>,
}

impl LocalStorage {
    pub fn in_memory() -> Self {
        LocalStorage {
            path: None,
            entries: Mutex::new(BTreeMap::new()),
        }
    }

    /// Opens a file-backed store, reading existing entries if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> ClientResult<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let contents =
                std::fs::read_to_string(&path).map_err(|e| storage_error(&path, e))?;
            if contents.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|e| storage_error(&path, e))?
            }
        } else {
            debug!(?path, "Local storage file not found, starting empty");
            BTreeMap::new()
        };

        info!(?path, entries = entries.len(), "Local storage opened");
        Ok(LocalStorage {
            path: Some(path),
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    pub fn remove(&self, key: &str) -> ClientResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> ClientResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| storage_error(path, e))?;
        }
        let contents = serde_json::to_string_pretty(entries)?;
        std::fs::write(path, contents).map_err(|e| storage_error(path, e))?;

        debug!(?path, "Local storage written");
        Ok(())
    }
}

fn storage_error(path: &Path, err: impl std::fmt::Display) -> ClientError {
    ClientError::Storage(format!("{}: {}", path.display(), err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_in_memory_set_get_remove() {
        let storage = LocalStorage::in_memory();
        assert_eq!(storage.get(COLLECTION_ID_KEY), None);

        storage.set(COLLECTION_ID_KEY, "c1").unwrap();
        assert_eq!(storage.get(COLLECTION_ID_KEY).as_deref(), Some("c1"));

        storage.remove(COLLECTION_ID_KEY).unwrap();
        assert_eq!(storage.get(COLLECTION_ID_KEY), None);
        assert!(storage.path().is_none());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("local_storage.json");

        let storage = LocalStorage::open(&path).unwrap();
        storage.set(COLLECTION_ID_KEY, "c42").unwrap();
        drop(storage);

        let reopened = LocalStorage::open(&path).unwrap();
        assert_eq!(reopened.get(COLLECTION_ID_KEY).as_deref(), Some("c42"));

        reopened.remove(COLLECTION_ID_KEY).unwrap();
        let again = LocalStorage::open(&path).unwrap();
        assert_eq!(again.get(COLLECTION_ID_KEY), None);
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        std::fs::write(&path, "not json").unwrap();

        let err = LocalStorage::open(&path).err().unwrap();
        assert!(matches!(err, ClientError::Storage(_)));
    }

    #[test]
    fn test_failed_write_leaves_memory_untouched() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "a file, not a directory").unwrap();

        let storage = LocalStorage::open(blocker.join("local_storage.json")).unwrap();
        let err = storage.set(COLLECTION_ID_KEY, "c1").unwrap_err();
        assert!(matches!(err, ClientError::Storage(_)));
        assert_eq!(storage.get(COLLECTION_ID_KEY), None);
    }

    #[test]
    fn test_failed_remove_keeps_entry() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("local_storage.json");
        std::fs::write(&path, r#"{"collectionId": "c7"}"#).unwrap();
        let storage = LocalStorage::open(&path).unwrap();

        // Replace the file with a directory so the rewrite fails.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(storage.remove(COLLECTION_ID_KEY).is_err());
        assert_eq!(storage.get(COLLECTION_ID_KEY).as_deref(), Some("c7"));
    }
}
