//! # Tasklist Runtime
//!
//! Runtime implementation for the tasklist reducer architecture.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: Owns state, runs the reducer and executes effects
//! - **Observers**: Refresh callbacks notified by [`Effect::Refresh`]
//! - **Feedback**: Actions returned by [`Effect::Run`] are reduced immediately
//!
//! Everything is synchronous and single-writer: the Store is the only thing
//! that mutates state, and `send` takes `&mut self`, so there is nothing to
//! race against.
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let mut store = Store::new(initial_state, my_reducer, environment);
//! store.subscribe(|state| render(state));
//! store.refresh();
//!
//! // Send an action
//! store.send(Action::DoSomething);
//!
//! // Read state
//! let value = store.state().some_field;
//! ```

use tasklist_core::{effect::Effect, reducer::Reducer};

pub use store::{Observer, Store};

/// Maximum depth of the action → effect → action feedback chain.
///
/// A reducer that keeps feeding actions back beyond this depth is treated as
/// a bug: the offending action is dropped and logged.
pub const MAX_FEEDBACK_DEPTH: usize = 32;

/// The Store and its effect executor
pub mod store {
    use super::{Effect, MAX_FEEDBACK_DEPTH, Reducer};

    /// Refresh callback registered with [`Store::subscribe`]
    pub type Observer<S> = Box<dyn FnMut(&S)>;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (owned, mutated only by the reducer)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (in order, with feedback loop)
    /// 5. Observers (notified on [`Effect::Refresh`])
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: S,
        reducer: R,
        environment: E,
        observers: Vec<Observer<S>>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        A: std::fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// No observer is registered and no refresh is emitted; call
        /// [`Store::subscribe`] and then [`Store::refresh`] to render the
        /// initial state.
        #[must_use]
        pub const fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: initial_state,
                reducer,
                environment,
                observers: Vec::new(),
            }
        }

        /// Register a refresh observer
        ///
        /// Observers run in registration order every time an
        /// [`Effect::Refresh`] executes. They only ever see a shared borrow of
        /// the state.
        pub fn subscribe<F>(&mut self, observer: F)
        where
            F: FnMut(&S) + 'static,
        {
            self.observers.push(Box::new(observer));
        }

        /// Number of registered observers
        #[must_use]
        pub fn observer_count(&self) -> usize {
            self.observers.len()
        }

        /// Notify every observer with the current state
        pub fn refresh(&mut self) {
            tracing::trace!(observers = self.observers.len(), "Notifying observers");
            metrics::counter!("store.refreshes").increment(1);
            for observer in &mut self.observers {
                observer(&self.state);
            }
        }

        /// Send an action to the store
        ///
        /// The reducer runs, then every returned effect executes in order
        /// before this call returns. Actions fed back by [`Effect::Run`] are
        /// reduced (and their effects executed) at the point they are produced.
        ///
        /// # Returns
        ///
        /// `true` if the reducer produced any effect, `false` if the action was
        /// a no-op.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub fn send(&mut self, action: A) -> bool {
            self.dispatch(action, 0)
        }

        /// Read access to the current state
        #[must_use]
        pub const fn state(&self) -> &S {
            &self.state
        }

        /// Tear the store down, returning its final state
        #[must_use]
        pub fn into_state(self) -> S {
            self.state
        }

        fn dispatch(&mut self, action: A, depth: usize) -> bool {
            if depth > MAX_FEEDBACK_DEPTH {
                tracing::error!(?action, depth, "Feedback chain too deep, dropping action");
                metrics::counter!("store.actions.dropped").increment(1);
                return false;
            }

            tracing::debug!(?action, depth, "Reducing action");
            metrics::counter!("store.actions.processed").increment(1);

            let effects = self.reducer.reduce(&mut self.state, action, &self.environment);
            let produced = !effects.is_empty();

            for effect in effects {
                self.execute(effect, depth);
            }

            produced
        }

        fn execute(&mut self, effect: Effect<A>, depth: usize) {
            match effect {
                Effect::Sequential(effects) => {
                    tracing::trace!("Executing Effect::Sequential with {} effects", effects.len());
                    metrics::counter!("store.effects.executed", "type" => "sequential")
                        .increment(1);
                    for effect in effects {
                        self.execute(effect, depth);
                    }
                },
                Effect::Run(f) => {
                    tracing::trace!("Executing Effect::Run");
                    metrics::counter!("store.effects.executed", "type" => "run").increment(1);
                    if let Some(action) = f() {
                        tracing::trace!("Effect::Run produced an action, feeding back");
                        self.dispatch(action, depth + 1);
                    }
                },
                Effect::Refresh => {
                    metrics::counter!("store.effects.executed", "type" => "refresh").increment(1);
                    self.refresh();
                },
            }
        }
    }
}
