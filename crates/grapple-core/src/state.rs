use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::remember;
use crate::runtime::{InstanceCore, current_instance};

/// Setter half of [`use_state`].
///
/// Created once per slot, so every render hands back a setter that compares
/// equal to the previous one. Writing invalidates the owning instance; after
/// the instance is torn down the setter does nothing.
pub struct SetState<T> {
    cell: Rc<RefCell<T>>,
    owner: Weak<InstanceCore>,
}

impl<T> Clone for SetState<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            owner: self.owner.clone(),
        }
    }
}

impl<T> PartialEq for SetState<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl<T> fmt::Debug for SetState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SetState({:p})", Rc::as_ptr(&self.cell))
    }
}

impl<T: 'static> SetState<T> {
    fn live_owner(&self) -> Option<Rc<InstanceCore>> {
        self.owner.upgrade().filter(|o| o.is_mounted())
    }

    pub fn set(&self, value: T) {
        let Some(owner) = self.live_owner() else {
            log::trace!("state write after teardown ignored");
            return;
        };
        *self.cell.borrow_mut() = value;
        owner.invalidate();
    }

    /// Applies `f` to the latest written value, so several updates issued
    /// before a re-render compose.
    ///
    /// `f` sees a copy, so it may itself read or write this state.
    pub fn update(&self, f: impl FnOnce(&T) -> T)
    where
        T: Clone,
    {
        let current = self.get();
        self.set(f(&current));
    }

    /// The latest written value, which may be newer than what the last
    /// render observed.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.cell.borrow().clone()
    }
}

/// A state cell bound to the current instance.
pub fn use_state<T: Clone + 'static>(init: impl FnOnce() -> T) -> (T, SetState<T>) {
    let setter = remember(|| SetState {
        cell: Rc::new(RefCell::new(init())),
        owner: current_instance()
            .map(|core| Rc::downgrade(&core))
            .unwrap_or_default(),
    });
    let value = setter.get();
    (value, (*setter).clone())
}

/// A mutable box that survives re-renders without triggering them.
pub fn use_ref<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}
