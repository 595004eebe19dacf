//! Local task list: add, complete, edit, filter and delete short text items,
//! with the whole list persisted to a durable slot after every change.
//!
//! The list is a reducer driven by a synchronous [`Store`]. Each mutation
//! writes the durable copy first and then notifies the registered observer,
//! which re-reads the state and re-applies the active filter.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tasks::{ItemRepository, TaskCommands, TaskEnvironment, FilterMode};
//! use tasklist_core::environment::SystemClock;
//! use tasklist_testing::InMemorySlot;
//! use tasks::ids::TimeRandomIds;
//!
//! let env = TaskEnvironment::new(
//!     Arc::new(SystemClock),
//!     Arc::new(TimeRandomIds::default()),
//!     ItemRepository::new(Arc::new(InMemorySlot::new()), "tasks_v1"),
//! );
//! let mut store = tasks::open(env, |state| println!("{}", state.summary()));
//!
//! store.add("Buy milk");
//! let id = store.state().items[0].id.clone();
//! store.toggle(&id);
//! store.set_filter(FilterMode::Active);
//!
//! assert!(store.state().visible().is_empty());
//! assert_eq!(store.state().summary().to_string(), "0 of 1 task remaining");
//! ```

pub mod config;
pub mod driver;
pub mod filter;
pub mod ids;
pub mod reducer;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use filter::{FilterMode, RemainingSummary, apply_filter};
pub use reducer::{TaskEnvironment, TaskReducer};
pub use storage::{FileSlot, ItemRepository, StorageError};
pub use types::{Item, ItemId, TaskAction, TaskState};

use tasklist_runtime::Store;

/// Store running the task reducer
pub type TaskStore = Store<TaskState, TaskAction, TaskEnvironment, TaskReducer>;

/// Start a task store
///
/// Loads the durable copy exactly once, registers `observer` and sends the
/// initial refresh.
pub fn open<F>(environment: TaskEnvironment, observer: F) -> TaskStore
where
    F: FnMut(&TaskState) + 'static,
{
    let items = environment.repository.load();
    tracing::info!(
        key = environment.repository.key(),
        count = items.len(),
        "Opening task store"
    );

    let mut store = Store::new(TaskState::from_items(items), TaskReducer::new(), environment);
    store.subscribe(observer);
    store.refresh();
    store
}

/// The operations the presentation layer may invoke
///
/// Each returns `true` if the list changed (and was persisted), `false` if
/// the call was a no-op.
pub trait TaskCommands {
    /// Add an item with `text` at the head of the list
    fn add(&mut self, text: impl Into<String>) -> bool;

    /// Flip an item's completion flag
    fn toggle(&mut self, id: &ItemId) -> bool;

    /// Replace an item's text
    fn edit(&mut self, id: &ItemId, text: impl Into<String>) -> bool;

    /// Delete an item
    fn remove(&mut self, id: &ItemId) -> bool;

    /// Delete every completed item
    fn clear_completed(&mut self) -> bool;

    /// Change the active filter (refreshes, never persists)
    fn set_filter(&mut self, mode: FilterMode) -> bool;
}

impl TaskCommands for TaskStore {
    fn add(&mut self, text: impl Into<String>) -> bool {
        self.send(TaskAction::Add { text: text.into() })
    }

    fn toggle(&mut self, id: &ItemId) -> bool {
        self.send(TaskAction::Toggle { id: id.clone() })
    }

    fn edit(&mut self, id: &ItemId, text: impl Into<String>) -> bool {
        self.send(TaskAction::Edit {
            id: id.clone(),
            text: text.into(),
        })
    }

    fn remove(&mut self, id: &ItemId) -> bool {
        self.send(TaskAction::Remove { id: id.clone() })
    }

    fn clear_completed(&mut self) -> bool {
        self.send(TaskAction::ClearCompleted)
    }

    fn set_filter(&mut self, mode: FilterMode) -> bool {
        self.send(TaskAction::SetFilter { mode })
    }
}
