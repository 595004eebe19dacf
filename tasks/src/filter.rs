//! Filter projection and the remaining-count summary.
//!
//! Both are pure reads over the collection; neither ever mutates it.

use crate::types::Item;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Which items a view shows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// Every item
    #[default]
    All,
    /// Items not yet completed
    Active,
    /// Completed items
    Completed,
}

impl FilterMode {
    /// All modes, in display order
    pub const MODES: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Whether `item` belongs in a view with this mode
    #[must_use]
    pub const fn matches(self, item: &Item) -> bool {
        match self {
            Self::All => true,
            Self::Active => !item.completed,
            Self::Completed => item.completed,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown filter name
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown filter '{0}' (expected all, active or completed)")]
pub struct ParseFilterModeError(String);

impl FromStr for FilterMode {
    type Err = ParseFilterModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::MODES
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFilterModeError(s.to_string()))
    }
}

/// Items matching `mode`, keeping their relative order
#[must_use]
pub fn apply_filter(items: &[Item], mode: FilterMode) -> Vec<&Item> {
    items.iter().filter(|item| mode.matches(item)).collect()
}

/// "`remaining` of `total` tasks remaining"
///
/// The noun is singular exactly when `total` is 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemainingSummary {
    /// Items not yet completed
    pub remaining: usize,
    /// All items
    pub total: usize,
}

impl RemainingSummary {
    /// Summarize a collection
    #[must_use]
    pub fn of(items: &[Item]) -> Self {
        Self {
            remaining: items.iter().filter(|item| !item.completed).count(),
            total: items.len(),
        }
    }

    /// `task` or `tasks`
    #[must_use]
    pub const fn noun(&self) -> &'static str {
        if self.total == 1 { "task" } else { "tasks" }
    }
}

impl std::fmt::Display for RemainingSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} {} remaining",
            self.remaining,
            self.total,
            self.noun()
        )
    }
}
