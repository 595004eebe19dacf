//! End-to-end behaviour of the task store: persistence, refresh signals and
//! the documented scenarios.

// Test code can use unwrap/expect/panic
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use tasklist_testing::{FailingSlot, InMemorySlot, SequentialIds, test_clock};
use tasks::storage::decode;
use tasks::{
    FilterMode, ItemId, ItemRepository, TaskCommands, TaskEnvironment, TaskState, TaskStore,
    apply_filter,
};

const KEY: &str = "tasks_v1";

/// Item texts seen at each refresh
type Frames = Rc<RefCell<Vec<Vec<String>>>>;

/// Store over `slot`, plus the frames it has refreshed so far
fn open_with(slot: Arc<dyn tasklist_core::slot::Slot>) -> (TaskStore, Frames) {
    let env = TaskEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(SequentialIds::new()),
        ItemRepository::new(slot, KEY),
    );
    let frames: Frames = Rc::default();
    let sink = Rc::clone(&frames);
    let store = tasks::open(env, move |state: &TaskState| {
        sink.borrow_mut()
            .push(state.items.iter().map(|item| item.text.clone()).collect());
    });
    (store, frames)
}

fn stored_texts(slot: &InMemorySlot) -> Vec<String> {
    decode(&slot.payload(KEY).unwrap())
        .unwrap()
        .into_iter()
        .map(|item| item.text)
        .collect()
}

#[test]
fn startup_loads_once_and_refreshes_once() {
    let slot = InMemorySlot::with_payload(
        KEY,
        r#"[{"id":"x","text":"Saved earlier","completed":false,"createdAt":1700000000000}]"#,
    );
    let (store, frames) = open_with(Arc::new(slot.clone()));

    assert_eq!(store.state().count(), 1);
    assert_eq!(*frames.borrow(), vec![vec!["Saved earlier".to_string()]]);
    assert_eq!(store.state().filter, FilterMode::All);
    assert_eq!(slot.read_count(), 1);
    assert_eq!(slot.write_count(), 0);
}

#[test]
fn corrupt_slot_starts_empty() {
    let slot = InMemorySlot::with_payload(KEY, "][ definitely not json");
    let (store, frames) = open_with(Arc::new(slot));

    assert_eq!(store.state().count(), 0);
    assert_eq!(frames.borrow().len(), 1);
}

#[test]
fn blank_stored_text_is_never_written_back() {
    let slot = InMemorySlot::with_payload(
        KEY,
        r#"[{"id":"x","text":"   ","completed":false,"createdAt":1700000000000}]"#,
    );
    let (mut store, _) = open_with(Arc::new(slot.clone()));
    assert_eq!(store.state().count(), 0);

    store.add("new");

    assert_eq!(stored_texts(&slot), vec!["new"]);
}

#[test]
fn every_mutation_is_persisted_before_refresh() {
    let slot = InMemorySlot::new();
    let (mut store, frames) = open_with(Arc::new(slot.clone()));

    assert!(store.add("Buy milk"));
    assert_eq!(slot.write_count(), 1);
    assert_eq!(stored_texts(&slot), vec!["Buy milk"]);
    assert_eq!(frames.borrow().len(), 2);

    let id = store.state().items[0].id.clone();
    assert!(store.edit(&id, "Buy oat milk"));
    assert!(store.toggle(&id));
    assert!(store.clear_completed());

    assert_eq!(slot.write_count(), 4);
    assert!(stored_texts(&slot).is_empty());
    assert_eq!(frames.borrow().len(), 5);
    // Mutations work from memory; the slot is only read at startup
    assert_eq!(slot.read_count(), 1);
}

#[test]
fn no_ops_neither_persist_nor_refresh() {
    let slot = InMemorySlot::new();
    let (mut store, frames) = open_with(Arc::new(slot.clone()));
    store.add("Keep");
    let id = store.state().items[0].id.clone();
    let writes = slot.write_count();
    let refreshes = frames.borrow().len();

    assert!(!store.add(""));
    assert!(!store.add("   "));
    assert!(!store.edit(&id, " "));
    assert!(!store.toggle(&ItemId::from("missing")));
    assert!(!store.edit(&ItemId::from("missing"), "text"));
    assert!(!store.remove(&ItemId::from("missing")));
    assert!(!store.clear_completed());

    assert_eq!(slot.write_count(), writes);
    assert_eq!(frames.borrow().len(), refreshes);
    assert_eq!(store.state().items[0].text, "Keep");
}

#[test]
fn filter_changes_refresh_without_writing() {
    let slot = InMemorySlot::new();
    let (mut store, frames) = open_with(Arc::new(slot.clone()));

    assert!(store.set_filter(FilterMode::Completed));

    assert_eq!(store.state().filter, FilterMode::Completed);
    assert_eq!(slot.write_count(), 0);
    assert_eq!(frames.borrow().len(), 2);
}

#[test]
fn buy_milk_scenario() {
    let (mut store, _) = open_with(Arc::new(InMemorySlot::new()));

    store.add("Buy milk");
    let state = store.state();
    assert_eq!(state.count(), 1);
    assert_eq!(state.items[0].text, "Buy milk");
    assert!(!state.items[0].completed);

    let id = state.items[0].id.clone();
    store.toggle(&id);
    let state = store.state();
    assert!(state.items[0].completed);
    assert!(apply_filter(&state.items, FilterMode::Active).is_empty());
    assert_eq!(apply_filter(&state.items, FilterMode::Completed).len(), 1);
    assert_eq!(state.summary().to_string(), "0 of 1 task remaining");
}

#[test]
fn newest_first_scenario() {
    let (mut store, _) = open_with(Arc::new(InMemorySlot::new()));

    store.add("A");
    store.add("B");
    store.add("C");

    let texts: Vec<&str> = store.state().items.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["C", "B", "A"]);
}

#[test]
fn reopening_restores_the_collection() {
    let slot = InMemorySlot::new();
    let (mut store, _) = open_with(Arc::new(slot.clone()));
    store.add("First");
    store.add("Second");
    let id = store.state().items[1].id.clone();
    store.toggle(&id);
    let before = store.into_state().items;

    let (reopened, _) = open_with(Arc::new(slot));
    assert_eq!(reopened.state().items, before);
}

#[test]
fn failed_save_is_a_warning_not_a_crash() {
    let slot = FailingSlot::new();
    let (mut store, frames) = open_with(Arc::new(slot.clone()));

    assert!(store.add("Unsaved"));

    assert_eq!(slot.attempts(), 1);
    assert_eq!(store.state().items[0].text, "Unsaved");
    assert!(
        store
            .state()
            .last_save_error
            .as_deref()
            .unwrap()
            .contains("quota exceeded")
    );
    // The refresh still happened, after the failure was recorded
    assert_eq!(frames.borrow().len(), 2);
}

#[derive(Clone, Debug)]
enum Op {
    Add(String),
    Toggle(usize),
    Edit(usize, String),
    Remove(usize),
    ClearCompleted,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[ a-z]{0,8}".prop_map(Op::Add),
        (0usize..8).prop_map(Op::Toggle),
        ((0usize..8), "[ a-z]{0,8}").prop_map(|(i, t)| Op::Edit(i, t)),
        (0usize..8).prop_map(Op::Remove),
        Just(Op::ClearCompleted),
    ]
}

fn id_at(store: &TaskStore, index: usize) -> ItemId {
    store
        .state()
        .items
        .get(index)
        .map_or_else(|| ItemId::from("missing"), |item| item.id.clone())
}

proptest! {
    #[test]
    fn invariants_hold_and_durable_copy_matches(ops in prop::collection::vec(op(), 0..40)) {
        let slot = InMemorySlot::new();
        let (mut store, _) = open_with(Arc::new(slot.clone()));

        for op in ops {
            match op {
                Op::Add(text) => { store.add(text); },
                Op::Toggle(i) => { let id = id_at(&store, i); store.toggle(&id); },
                Op::Edit(i, text) => { let id = id_at(&store, i); store.edit(&id, text); },
                Op::Remove(i) => { let id = id_at(&store, i); store.remove(&id); },
                Op::ClearCompleted => { store.clear_completed(); },
            }

            let items = &store.state().items;
            let mut ids: Vec<&ItemId> = items.iter().map(|item| &item.id).collect();
            ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
            ids.dedup();
            prop_assert_eq!(ids.len(), items.len());
            prop_assert!(items.iter().all(|item| !item.text.trim().is_empty()));
        }

        let stored = slot.payload(KEY).map(|raw| decode(&raw).unwrap()).unwrap_or_default();
        prop_assert_eq!(&stored, &store.state().items);
    }

    #[test]
    fn toggle_is_an_involution(completed in any::<bool>()) {
        let (mut store, _) = open_with(Arc::new(InMemorySlot::new()));
        store.add("item");
        let id = store.state().items[0].id.clone();
        if completed {
            store.toggle(&id);
        }
        let before = store.state().items[0].completed;

        store.toggle(&id);
        store.toggle(&id);

        prop_assert_eq!(store.state().items[0].completed, before);
    }

    #[test]
    fn add_puts_trimmed_text_first(text in "[ ]{0,2}[a-z][a-z ]{0,10}") {
        let (mut store, _) = open_with(Arc::new(InMemorySlot::new()));
        store.add("existing");

        prop_assert!(store.add(text.clone()));

        let state = store.state();
        prop_assert_eq!(state.count(), 2);
        prop_assert_eq!(&state.items[0].text, text.trim());
        prop_assert!(!state.items[0].completed);
    }
}
