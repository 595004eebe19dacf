//! Domain types for the task list.
//!
//! A task list is an ordered collection of short text items, newest first,
//! plus the filter the presentation layer is currently showing.

use crate::filter::{FilterMode, RemainingSummary, apply_filter};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Opaque identifier of an item
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wraps an identifier string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single item
///
/// Serialized with camelCase keys and `createdAt` as epoch milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, immutable
    pub id: ItemId,
    /// Display text, never empty after trimming
    pub text: String,
    /// Whether the item is done
    pub completed: bool,
    /// When the item was added, immutable
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new, not yet completed item
    #[must_use]
    pub const fn new(id: ItemId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text,
            completed: false,
            created_at,
        }
    }
}

/// State owned by the task store
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskState {
    /// All items, newest first
    pub items: Vec<Item>,
    /// Filter the presentation layer is showing
    pub filter: FilterMode,
    /// Message of the last failed save, cleared by the next successful one
    pub last_save_error: Option<String>,
}

impl TaskState {
    /// Creates a new empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds state from previously persisted items
    ///
    /// Items with blank text are dropped, as are later duplicates of an id
    /// already seen, so loaded state keeps the same invariants as state
    /// built by the reducer.
    #[must_use]
    pub fn from_items(items: Vec<Item>) -> Self {
        let total = items.len();
        let items: Vec<Item> = items
            .into_iter()
            .filter(|item| !item.text.trim().is_empty())
            .collect();
        if items.len() != total {
            tracing::warn!(
                dropped = total - items.len(),
                "Persisted items contained blank text"
            );
        }

        let mut seen = HashSet::new();
        let total = items.len();
        let items: Vec<Item> = items
            .into_iter()
            .filter(|item| seen.insert(item.id.clone()))
            .collect();
        if items.len() != total {
            tracing::warn!(
                dropped = total - items.len(),
                "Persisted items contained duplicate ids"
            );
        }
        Self {
            items,
            ..Self::default()
        }
    }

    /// Returns the number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.completed).count()
    }

    /// Returns an item by id
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Checks if an item exists
    #[must_use]
    pub fn exists(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Items matching the active filter, in collection order
    #[must_use]
    pub fn visible(&self) -> Vec<&Item> {
        apply_filter(&self.items, self.filter)
    }

    /// Remaining-count summary over the whole collection
    #[must_use]
    pub fn summary(&self) -> RemainingSummary {
        RemainingSummary::of(&self.items)
    }

    pub(crate) fn get_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == id)
    }
}

/// Actions the task store understands
///
/// Everything except `SaveFailed` is sent by the presentation layer;
/// `SaveFailed` is fed back by the persistence effect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskAction {
    /// Add a new item at the head of the list
    Add {
        /// Raw text, trimmed before use
        text: String,
    },

    /// Flip an item's completion flag
    Toggle {
        /// Item to toggle
        id: ItemId,
    },

    /// Replace an item's text
    Edit {
        /// Item to edit
        id: ItemId,
        /// Raw text, trimmed before use
        text: String,
    },

    /// Delete an item
    Remove {
        /// Item to delete
        id: ItemId,
    },

    /// Delete every completed item
    ClearCompleted,

    /// Change which items the presentation layer shows
    SetFilter {
        /// New filter
        mode: FilterMode,
    },

    /// Writing the durable copy failed
    SaveFailed {
        /// Error message
        error: String,
    },
}
