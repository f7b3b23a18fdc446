//! State that remembers every value it has held.

use std::cell::RefCell;
use std::rc::Rc;

use grapple_core::prelude::*;

/// Append-only log of values with a cursor on the current one.
///
/// Invariants: the log is never empty, `cursor < len`, and the log only
/// grows. Pushing after stepping back appends past the skipped entries
/// rather than discarding them.
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryLog<T> {
    entries: Vec<T>,
    cursor: usize,
}

impl<T: Clone> HistoryLog<T> {
    pub fn new(initial: T) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn push(&mut self, value: T) {
        self.entries.push(value);
        self.cursor = self.entries.len() - 1;
    }

    /// Steps back; `None` when already at the oldest entry.
    pub fn back(&mut self) -> Option<T> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Steps forward; `None` when already at the newest entry.
    pub fn forward(&mut self) -> Option<T> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }
}

/// Stable handle for driving a [`use_state_with_history`] cell.
pub struct HistoryControls<T: 'static> {
    log: Rc<RefCell<HistoryLog<T>>>,
    set_internal: SetState<T>,
}

impl<T: Clone + 'static> HistoryControls<T> {
    pub fn set(&self, value: T) {
        self.log.borrow_mut().push(value.clone());
        self.set_internal.set(value);
    }

    pub fn go_back(&self) {
        let prev = self.log.borrow_mut().back();
        if let Some(value) = prev {
            self.set_internal.set(value);
        }
    }

    pub fn go_forward(&self) {
        let next = self.log.borrow_mut().forward();
        if let Some(value) = next {
            self.set_internal.set(value);
        }
    }

    /// Snapshot of the full log, including entries ahead of the cursor.
    pub fn history(&self) -> Vec<T> {
        self.log.borrow().entries().to_vec()
    }

    pub fn cursor(&self) -> usize {
        self.log.borrow().cursor()
    }
}

#[derive(Clone)]
pub struct StateWithHistory<T: 'static> {
    /// Value observed by this render.
    pub value: T,
    pub controls: Rc<HistoryControls<T>>,
}

impl<T: Clone + 'static> StateWithHistory<T> {
    pub fn history(&self) -> Vec<T> {
        self.controls.history()
    }

    pub fn cursor(&self) -> usize {
        self.controls.cursor()
    }
}

pub fn use_state_with_history<T: Clone + 'static>(initial: impl FnOnce() -> T) -> StateWithHistory<T> {
    let (value, set_internal) = use_state(initial);
    let controls = remember(|| HistoryControls {
        log: Rc::new(RefCell::new(HistoryLog::new(value.clone()))),
        set_internal,
    });
    StateWithHistory { value, controls }
}
