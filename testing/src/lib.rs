//! # Tasklist Testing
//!
//! Testing utilities and helpers for the tasklist reducer architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - In-memory and failing durable slots
//! - A Given-When-Then harness for reducers
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_testing::{test_clock, InMemorySlot, SequentialIds};
//!
//! let slot = InMemorySlot::new();
//! let env = TaskEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new()), repo);
//! ```

use chrono::{DateTime, Utc};
use tasklist_core::environment::{Clock, IdGenerator};
use tasklist_core::slot::{Slot, SlotError};

/// Ergonomic reducer testing
pub mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Slot, SlotError, Utc};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::{Arc, RwLock};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::FixedClock;
    /// use tasklist_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::<Utc>::from_timestamp_millis(1_735_689_600_000).unwrap_or_default(),
        )
    }

    /// Predictable ids: `id-1`, `id-2`, ...
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        next: AtomicU64,
    }

    impl SequentialIds {
        /// Create a generator whose first id is `id-1`
        #[must_use]
        pub const fn new() -> Self {
            Self {
                next: AtomicU64::new(0),
            }
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> String {
            let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            format!("id-{n}")
        }
    }

    /// Ids replayed from a fixed script, then `fallback-N` once exhausted
    ///
    /// Useful for forcing identifier collisions.
    #[derive(Debug)]
    pub struct ScriptedIds {
        script: Vec<String>,
        cursor: AtomicUsize,
    }

    impl ScriptedIds {
        /// Create a generator that yields `script` in order
        #[must_use]
        pub fn new<I, T>(script: I) -> Self
        where
            I: IntoIterator<Item = T>,
            T: Into<String>,
        {
            Self {
                script: script.into_iter().map(Into::into).collect(),
                cursor: AtomicUsize::new(0),
            }
        }
    }

    impl IdGenerator for ScriptedIds {
        fn next_id(&self) -> String {
            let i = self.cursor.fetch_add(1, Ordering::SeqCst);
            self.script
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("fallback-{i}"))
        }
    }

    /// In-memory slot store for fast, deterministic testing.
    ///
    /// Clones share the same underlying map, so a test can keep one handle
    /// while the code under test owns another.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::InMemorySlot;
    /// use tasklist_core::slot::Slot;
    ///
    /// let slot = InMemorySlot::new();
    /// slot.write("k", "[]").unwrap();
    /// assert_eq!(slot.read("k").unwrap().as_deref(), Some("[]"));
    /// assert_eq!(slot.write_count(), 1);
    /// ```
    #[derive(Clone, Debug, Default)]
    pub struct InMemorySlot {
        data: Arc<RwLock<HashMap<String, String>>>,
        reads: Arc<AtomicUsize>,
        writes: Arc<AtomicUsize>,
    }

    impl InMemorySlot {
        /// Create a new empty slot store
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a slot store with `payload` already stored under `key`
        #[must_use]
        pub fn with_payload(key: &str, payload: &str) -> Self {
            let slot = Self::new();
            if let Ok(mut data) = slot.data.write() {
                data.insert(key.to_string(), payload.to_string());
            }
            slot
        }

        /// Current payload under `key`, bypassing the [`Slot`] trait
        #[must_use]
        pub fn payload(&self, key: &str) -> Option<String> {
            self.data.read().ok().and_then(|data| data.get(key).cloned())
        }

        /// Number of reads so far, through the [`Slot`] trait
        #[must_use]
        pub fn read_count(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }

        /// Number of successful writes so far
        #[must_use]
        pub fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    impl Slot for InMemorySlot {
        fn read(&self, key: &str) -> Result<Option<String>, SlotError> {
            let data = self
                .data
                .read()
                .map_err(|_| SlotError::Unavailable("slot lock poisoned".to_string()))?;
            self.reads.fetch_add(1, Ordering::SeqCst);
            Ok(data.get(key).cloned())
        }

        fn write(&self, key: &str, payload: &str) -> Result<(), SlotError> {
            let mut data = self
                .data
                .write()
                .map_err(|_| SlotError::Unavailable("slot lock poisoned".to_string()))?;
            data.insert(key.to_string(), payload.to_string());
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Slot whose reads return a fixed payload and whose writes always fail
    ///
    /// Models a full or read-only backend.
    #[derive(Clone, Debug, Default)]
    pub struct FailingSlot {
        payload: Option<String>,
        attempts: Arc<AtomicUsize>,
    }

    impl FailingSlot {
        /// A failing slot that reads as empty
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// A failing slot that reads back `payload` for every key
        #[must_use]
        pub fn with_payload(payload: &str) -> Self {
            Self {
                payload: Some(payload.to_string()),
                attempts: Arc::default(),
            }
        }

        /// Number of rejected writes so far
        #[must_use]
        pub fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    impl Slot for FailingSlot {
        fn read(&self, _key: &str) -> Result<Option<String>, SlotError> {
            Ok(self.payload.clone())
        }

        fn write(&self, _key: &str, _payload: &str) -> Result<(), SlotError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(SlotError::Unavailable("quota exceeded".to_string()))
        }
    }
}

// Re-export commonly used items
pub use mocks::{FailingSlot, FixedClock, InMemorySlot, ScriptedIds, SequentialIds, test_clock};
pub use reducer_test::{ReducerTest, assertions};
