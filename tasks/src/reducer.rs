//! Reducer logic for the task list.
//!
//! Every mutation that changes the collection returns the same effect chain:
//! persist the full collection, then refresh observers. Inputs that would not
//! change anything (blank text, unknown id, nothing completed) are no-ops and
//! return no effects at all.

use crate::storage::ItemRepository;
use crate::types::{Item, ItemId, TaskAction, TaskState};
use std::sync::Arc;
use tasklist_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator},
    reducer::Reducer,
    smallvec,
};

/// Fresh ids tried before giving up on an add
pub const MAX_ID_ATTEMPTS: usize = 8;

/// Environment dependencies for the task reducer
#[derive(Clone)]
pub struct TaskEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of item ids
    pub ids: Arc<dyn IdGenerator>,
    /// Durable copy of the collection
    pub repository: ItemRepository,
}

impl TaskEnvironment {
    /// Creates a new `TaskEnvironment`
    #[must_use]
    pub fn new(
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
        repository: ItemRepository,
    ) -> Self {
        Self {
            clock,
            ids,
            repository,
        }
    }
}

/// Reducer for the task list
#[derive(Clone, Debug, Default)]
pub struct TaskReducer;

impl TaskReducer {
    /// Creates a new `TaskReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// An id not yet used by any item, if one turns up within a few attempts
    fn fresh_id(state: &TaskState, ids: &dyn IdGenerator) -> Option<ItemId> {
        (0..MAX_ID_ATTEMPTS)
            .map(|_| ItemId::new(ids.next_id()))
            .find(|id| !state.exists(id))
    }

    /// Write the collection, then refresh
    ///
    /// A failed write comes back as [`TaskAction::SaveFailed`] before the
    /// refresh runs, so observers see the warning.
    fn persist_and_refresh(
        state: &mut TaskState,
        env: &TaskEnvironment,
    ) -> SmallVec<[Effect<TaskAction>; 4]> {
        state.last_save_error = None;

        let snapshot = state.items.clone();
        let repository = env.repository.clone();
        let persist = Effect::run(move || match repository.save(&snapshot) {
            Ok(()) => None,
            Err(error) => {
                tracing::warn!(key = repository.key(), %error, "Failed to persist items");
                Some(TaskAction::SaveFailed {
                    error: error.to_string(),
                })
            },
        });

        smallvec![Effect::chain(vec![persist, Effect::Refresh])]
    }
}

impl Reducer for TaskReducer {
    type State = TaskState;
    type Action = TaskAction;
    type Environment = TaskEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TaskAction::Add { text } => {
                let text = text.trim();
                if text.is_empty() {
                    return SmallVec::new();
                }

                let Some(id) = Self::fresh_id(state, env.ids.as_ref()) else {
                    tracing::warn!(
                        attempts = MAX_ID_ATTEMPTS,
                        "Could not generate a unique id, item not added"
                    );
                    return SmallVec::new();
                };

                state
                    .items
                    .insert(0, Item::new(id, text.to_string(), env.clock.now()));
                Self::persist_and_refresh(state, env)
            },

            TaskAction::Toggle { id } => {
                let Some(item) = state.get_mut(&id) else {
                    tracing::debug!(%id, "Toggle of unknown item ignored");
                    return SmallVec::new();
                };
                item.completed = !item.completed;
                Self::persist_and_refresh(state, env)
            },

            TaskAction::Edit { id, text } => {
                let text = text.trim();
                if text.is_empty() {
                    return SmallVec::new();
                }
                let Some(item) = state.get_mut(&id) else {
                    tracing::debug!(%id, "Edit of unknown item ignored");
                    return SmallVec::new();
                };
                text.clone_into(&mut item.text);
                Self::persist_and_refresh(state, env)
            },

            TaskAction::Remove { id } => {
                let Some(index) = state.items.iter().position(|item| item.id == id) else {
                    tracing::debug!(%id, "Removal of unknown item ignored");
                    return SmallVec::new();
                };
                state.items.remove(index);
                Self::persist_and_refresh(state, env)
            },

            TaskAction::ClearCompleted => {
                let before = state.items.len();
                state.items.retain(|item| !item.completed);
                if state.items.len() == before {
                    return SmallVec::new();
                }
                Self::persist_and_refresh(state, env)
            },

            TaskAction::SetFilter { mode } => {
                state.filter = mode;
                smallvec![Effect::Refresh]
            },

            TaskAction::SaveFailed { error } => {
                state.last_save_error = Some(error);
                SmallVec::new()
            },
        }
    }
}
