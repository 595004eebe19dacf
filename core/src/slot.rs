//! Durable slot trait and related types.
//!
//! A slot store is the smallest possible persistence primitive: a set of named
//! keys, each holding one opaque text payload that is always replaced whole.
//! There is no partial write, append or merge.
//!
//! # Implementations
//!
//! - `FileSlot` (in the `tasks` crate): one file per key inside a directory
//! - `InMemorySlot` (in `tasklist-testing`): fast, deterministic testing
//! - `FailingSlot` (in `tasklist-testing`): every write fails, for error paths

use thiserror::Error;

/// Errors that can occur while reading or writing a slot.
#[derive(Error, Debug)]
pub enum SlotError {
    /// Underlying I/O failure (permissions, disk full, ...).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend refused the operation (quota exceeded, read-only, ...).
    #[error("Slot unavailable: {0}")]
    Unavailable(String),
}

/// Key-value storage where each key holds a whole serialized payload.
pub trait Slot: Send + Sync {
    /// Read the payload stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has ever been written to the key.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError`] if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, SlotError>;

    /// Replace the payload stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError`] if the payload could not be written.
    fn write(&self, key: &str, payload: &str) -> Result<(), SlotError>;
}
