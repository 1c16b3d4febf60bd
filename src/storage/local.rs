// Keyed JSON blob storage in the data directory
//
// One file per key (`<key>.json`). Writes go to a temp file and are renamed
// into place, so a reader sees either the old blob or the new one. Writers
// serialize on an exclusive lock over a sidecar `<key>.lock` file, which
// covers both threads and other processes sharing the directory.

use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::errors::StoreError;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

/// Exclusive hold on one key, released on drop
pub struct KeyLock {
    file: File,
}

impl Drop for KeyLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

impl LocalStorage {
    /// Open (creating if needed) the storage directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Take the writer lock for `key`
    pub fn lock(&self, key: &str) -> Result<KeyLock, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.root.join(format!("{}.lock", key)))?;
        FileExt::lock_exclusive(&file)?;
        Ok(KeyLock { file })
    }

    /// Read a blob. Absent is `Ok(None)`; unparseable is `CorruptStorage`.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let raw = match fs::read_to_string(self.blob_path(key)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::CorruptStorage {
                key: key.to_string(),
                reason: e.to_string(),
            })
    }

    /// Replace a blob atomically
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let _lock = self.lock(key)?;
        self.write_locked(key, value)
    }

    /// Write while the caller already holds the key's lock
    pub(crate) fn write_locked<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.blob_path(key);
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::CorruptStorage {
            key: key.to_string(),
            reason: format!("serialize: {}", e),
        })?;

        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Delete a blob. Deleting an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _lock = self.lock(key)?;
        match fs::remove_file(self.blob_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blob_path(key).exists()
    }
}
