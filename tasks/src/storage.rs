//! Storage adapter: the whole collection as one JSON payload in a slot.
//!
//! Loading never fails. A missing, empty, unreadable or malformed payload
//! all degrade to an empty collection. Saving always overwrites the full
//! payload.

use crate::types::Item;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tasklist_core::slot::{Slot, SlotError};
use thiserror::Error;

/// Default name of the durable slot
pub const DEFAULT_STORAGE_KEY: &str = "tasks_v1";

/// Errors from saving the collection
#[derive(Error, Debug)]
pub enum StorageError {
    /// The slot rejected the write
    #[error("storage write failed: {0}")]
    Slot(#[from] SlotError),

    /// The collection could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Reads and writes the item collection under one slot key
#[derive(Clone)]
pub struct ItemRepository {
    slot: Arc<dyn Slot>,
    key: String,
}

impl std::fmt::Debug for ItemRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemRepository").field("key", &self.key).finish_non_exhaustive()
    }
}

impl ItemRepository {
    /// Creates a repository over `slot`, storing under `key`
    #[must_use]
    pub fn new(slot: Arc<dyn Slot>, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    /// Slot key this repository writes to
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the stored collection, or an empty one if there is nothing usable
    #[must_use]
    pub fn load(&self) -> Vec<Item> {
        let raw = match self.slot.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %self.key, "No stored items, starting empty");
                return Vec::new();
            },
            Err(error) => {
                tracing::warn!(
                    key = %self.key,
                    %error,
                    "Could not read stored items, starting empty"
                );
                return Vec::new();
            },
        };

        if raw.trim().is_empty() {
            return Vec::new();
        }

        match decode(&raw) {
            Ok(items) => {
                tracing::debug!(key = %self.key, count = items.len(), "Loaded items");
                items
            },
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "Stored items are corrupt, starting empty");
                Vec::new()
            },
        }
    }

    /// Overwrites the stored collection with `items`
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if serialization or the slot write fails.
    pub fn save(&self, items: &[Item]) -> Result<(), StorageError> {
        let payload = encode(items)?;
        self.slot.write(&self.key, &payload)?;
        tracing::trace!(key = %self.key, count = items.len(), "Saved items");
        Ok(())
    }
}

/// Parses a stored payload
///
/// # Errors
///
/// Returns the parse error if `raw` is not a JSON array of items.
pub fn decode(raw: &str) -> Result<Vec<Item>, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Serializes a collection into a payload
///
/// # Errors
///
/// Returns the serialization error, which cannot happen for well-formed items.
pub fn encode(items: &[Item]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Directory-backed slots: key `k` lives in `<dir>/k.json`
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so readers never see a half-written payload.
#[derive(Clone, Debug)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    /// Creates a slot store rooted at `dir` (created lazily on first write)
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates a slot store rooted at `dir`, creating the directory now
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SlotError> {
        let slot = Self::new(dir);
        fs::create_dir_all(&slot.dir)?;
        Ok(slot)
    }

    /// Root directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`
    ///
    /// # Errors
    ///
    /// Returns [`SlotError::Unavailable`] for keys that are not a plain file name.
    pub fn path_for(&self, key: &str) -> Result<PathBuf, SlotError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\'])
            && !key.contains('\0');
        if !valid {
            return Err(SlotError::Unavailable(format!("invalid slot key '{key}'")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Slot for FileSlot {
    fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), SlotError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let mut file = tempfile::NamedTempFile::new_in(&self.dir)?;
        file.write_all(payload.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&path).map_err(|e| SlotError::Io(e.error))?;
        Ok(())
    }
}
