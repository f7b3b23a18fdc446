use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::Dispose;

type Disposer = Box<dyn FnOnce()>;

thread_local! {
    static CURRENT_SCOPE: RefCell<Option<Weak<RefCell<Vec<Disposer>>>>> = const { RefCell::new(None) };
}

/// Cleanup owned by one mounted instance.
///
/// Hooks register disposers while the instance renders or runs effects;
/// `dispose` runs them in registration order. A scope dropped without an
/// explicit `dispose` still runs whatever is left.
#[derive(Clone, Default)]
pub struct Scope {
    disposers: Rc<RefCell<Vec<Disposer>>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with this scope as the current one.
    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let prev = CURRENT_SCOPE.with(|current| {
            current
                .borrow_mut()
                .replace(Rc::downgrade(&self.disposers))
        });
        let _restore = RestoreScope(prev);
        f()
    }

    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        self.disposers.borrow_mut().push(Box::new(disposer));
    }

    pub fn disposer_count(&self) -> usize {
        self.disposers.borrow().len()
    }

    pub fn dispose(self) {
        run_all(&self.disposers);
    }
}

fn run_all(disposers: &RefCell<Vec<Disposer>>) {
    // Taken first: a disposer may register more cleanup.
    let pending = std::mem::take(&mut *disposers.borrow_mut());
    for disposer in pending {
        disposer();
    }
}

struct RestoreScope(Option<Weak<RefCell<Vec<Disposer>>>>);

impl Drop for RestoreScope {
    fn drop(&mut self) {
        let prev = self.0.take();
        CURRENT_SCOPE.with(|current| *current.borrow_mut() = prev);
    }
}

pub fn current_scope() -> Option<Scope> {
    CURRENT_SCOPE.with(|current| {
        current
            .borrow()
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|disposers| Scope { disposers })
    })
}

/// Runs `f` now and hands its cleanup to the current scope.
pub fn scoped_effect<F>(f: F)
where
    F: FnOnce() -> Dispose + 'static,
{
    match current_scope() {
        Some(scope) => {
            let cleanup = f();
            scope.add_disposer(move || cleanup.run());
        }
        None => {
            log::warn!("scoped_effect: no current scope; cleanup will never run");
            let _ = f();
        }
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if Rc::strong_count(&self.disposers) == 1 {
            run_all(&self.disposers);
        }
    }
}
