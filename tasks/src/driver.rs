//! Text presentation of the task list.
//!
//! The store only says "something changed"; on every refresh the [`Screen`]
//! re-reads the state, applies the active filter and renders a frame. The
//! binary decides when to print the latest frame.

use crate::types::{Item, TaskState};
use chrono::Local;
use std::cell::{Cell, RefCell};
use std::fmt::Write as _;
use std::rc::Rc;

/// Line shown when the filtered view is empty
pub const EMPTY_STATE: &str = "Nothing here. Add a task to get started.";

/// Latest rendered frame, filled by the store's refresh observer
#[derive(Clone, Debug, Default)]
pub struct Screen {
    frame: Rc<RefCell<Option<String>>>,
    refreshes: Rc<Cell<usize>>,
}

impl Screen {
    /// Creates an empty screen
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observer to register with the store
    pub fn observer(&self) -> impl FnMut(&TaskState) + 'static {
        let frame = Rc::clone(&self.frame);
        let refreshes = Rc::clone(&self.refreshes);
        move |state: &TaskState| {
            *frame.borrow_mut() = Some(render(state));
            refreshes.set(refreshes.get() + 1);
        }
    }

    /// Takes the frame rendered since the last call, if any
    #[must_use]
    pub fn take_frame(&self) -> Option<String> {
        self.frame.borrow_mut().take()
    }

    /// Number of refreshes observed so far
    #[must_use]
    pub fn refreshes(&self) -> usize {
        self.refreshes.get()
    }
}

/// Renders the visible items, the summary line and any save warning
#[must_use]
pub fn render(state: &TaskState) -> String {
    let mut out = String::new();
    let visible = state.visible();

    if visible.is_empty() {
        out.push_str(EMPTY_STATE);
        out.push('\n');
    }
    for item in visible {
        render_item(&mut out, item);
    }

    let _ = writeln!(out, "{}  [filter: {}]", state.summary(), state.filter);
    if let Some(error) = &state.last_save_error {
        let _ = writeln!(out, "warning: changes were not saved ({error})");
    }
    out
}

fn render_item(out: &mut String, item: &Item) {
    let check = if item.completed { 'x' } else { ' ' };
    let _ = writeln!(out, "[{check}] {}  {}", item.id, item.text);
    let _ = writeln!(out, "      Added: {}", format_time(item));
}

fn format_time(item: &Item) -> String {
    item.created_at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}
