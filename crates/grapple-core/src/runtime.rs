use std::any::Any;
use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::{Rc, Weak};

use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;
use slotmap::{SlotMap, new_key_type};
use smallvec::SmallVec;

use crate::scope::Scope;
use crate::timer::TimerQueue;
use crate::{Clock, SystemClock};

new_key_type! {
    pub struct InstanceId;
}

thread_local! {
    static CURRENT: RefCell<Option<Rc<InstanceCore>>> = const { RefCell::new(None) };
}

#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    /// Upper bound on re-render passes per `flush`. An instance that keeps
    /// invalidating itself during render is cut off here.
    pub max_render_passes: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            max_render_passes: 64,
        }
    }
}

/// Slot table of one instance.
#[derive(Default)]
struct Composer {
    slots: Vec<Box<dyn Any>>,
    cursor: usize,
}

type PendingEffect = Box<dyn FnOnce()>;

/// Per-instance bookkeeping shared by everything the instance's hooks create.
pub(crate) struct InstanceCore {
    id: Cell<Option<InstanceId>>,
    composer: RefCell<Composer>,
    scope: Scope,
    pending: RefCell<SmallVec<[PendingEffect; 4]>>,
    dirty: Cell<bool>,
    mounted: Cell<bool>,
    runtime: Weak<RuntimeShared>,
}

impl InstanceCore {
    pub(crate) fn is_mounted(&self) -> bool {
        self.mounted.get()
    }

    /// Marks the instance for re-render on the next flush.
    pub(crate) fn invalidate(&self) {
        if !self.mounted.get() {
            return;
        }
        if !self.dirty.replace(true) {
            log::trace!("instance {:?} invalidated", self.id.get());
        }
    }

    fn teardown(&self) {
        if !self.mounted.replace(false) {
            return;
        }
        log::debug!("tearing down instance {:?}", self.id.get());
        if let (Some(id), Some(rt)) = (self.id.get(), self.runtime.upgrade()) {
            rt.instances.borrow_mut().remove(id);
        }
        self.pending.borrow_mut().clear();
        self.scope.clone().dispose();
        let slots = std::mem::take(&mut self.composer.borrow_mut().slots);
        drop(slots);
    }
}

pub(crate) fn current_instance() -> Option<Rc<InstanceCore>> {
    CURRENT.with(|c| c.borrow().clone())
}

pub(crate) fn current_runtime() -> Option<Rc<RuntimeShared>> {
    current_instance().and_then(|core| core.runtime.upgrade())
}

/// Makes `core` the instance hooks talk to until dropped.
struct ComposeGuard {
    prev: Option<Rc<InstanceCore>>,
}

impl ComposeGuard {
    fn begin(core: &Rc<InstanceCore>) -> Self {
        core.composer.borrow_mut().cursor = 0;
        let prev = CURRENT.with(|c| c.borrow_mut().replace(core.clone()));
        ComposeGuard { prev }
    }
}

impl Drop for ComposeGuard {
    fn drop(&mut self) {
        let prev = self.prev.take();
        CURRENT.with(|c| *c.borrow_mut() = prev);
    }
}

/// Queues `f` to run after the current render's body returns.
pub(crate) fn after_render(f: impl FnOnce() + 'static) {
    match current_instance() {
        Some(core) => core.pending.borrow_mut().push(Box::new(f)),
        None => {
            log::warn!("effect registered outside of a mounted instance; running it now");
            f()
        }
    }
}

/// Slot-based remember (sequential composition only).
///
/// The Nth call during a render always refers to the Nth slot, so hooks must
/// be called in the same order on every render. `init` must not itself call
/// `remember`.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let Some(core) = current_instance() else {
        log::warn!("remember called outside of a mounted instance; value will not persist");
        return Rc::new(init());
    };

    let cursor = {
        let mut c = core.composer.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;
        if let Some(slot) = c.slots.get(cursor) {
            if let Some(rc) = slot.downcast_ref::<Rc<T>>() {
                return rc.clone();
            }
            log::warn!(
                "remember: slot {} type changed; replacing. \
                 Hooks must be called in the same order on every render.",
                cursor
            );
        }
        cursor
    };

    let rc: Rc<T> = Rc::new(init());
    let mut c = core.composer.borrow_mut();
    if cursor < c.slots.len() {
        c.slots[cursor] = Box::new(rc.clone());
    } else {
        c.slots.push(Box::new(rc.clone()));
    }
    rc
}

/// Spawns `fut` on the current runtime's local executor. It makes progress
/// during [`Runtime::pump`].
pub fn spawn_local(fut: impl Future<Output = ()> + 'static) {
    let Some(rt) = current_runtime() else {
        log::warn!("spawn_local called outside of a mounted instance; task dropped");
        return;
    };
    if let Err(e) = rt.spawner.spawn_local(fut) {
        log::warn!("spawn_local: executor refused task: {e:?}");
    }
}

trait Rerender {
    fn is_dirty(&self) -> bool;
    fn rerender(&self);
}

struct Node<T> {
    core: Rc<InstanceCore>,
    body: RefCell<Box<dyn FnMut() -> T>>,
    output: RefCell<Option<T>>,
}

impl<T: 'static> Node<T> {
    fn render(&self) {
        let core = &self.core;
        if !core.is_mounted() {
            return;
        }
        core.dirty.set(false);

        let _guard = ComposeGuard::begin(core);
        let out = core.scope.run(|| {
            let mut body = self.body.borrow_mut();
            (*body)()
        });
        *self.output.borrow_mut() = Some(out);

        let effects = std::mem::take(&mut *core.pending.borrow_mut());
        core.scope.run(|| {
            for effect in effects {
                effect();
            }
        });
    }
}

impl<T: 'static> Rerender for Node<T> {
    fn is_dirty(&self) -> bool {
        self.core.dirty.get()
    }

    fn rerender(&self) {
        self.render();
    }
}

/// A mounted component: its body, its slots, and its scope.
///
/// Dropping the handle tears the instance down.
pub struct Instance<T: 'static> {
    node: Rc<Node<T>>,
}

impl<T: 'static> Instance<T> {
    pub fn id(&self) -> Option<InstanceId> {
        self.node.core.id.get()
    }

    /// Clone of the output of the most recent render.
    pub fn output(&self) -> T
    where
        T: Clone,
    {
        self.with_output(T::clone)
    }

    pub fn with_output<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let out = self.node.output.borrow();
        match out.as_ref() {
            Some(out) => f(out),
            None => unreachable!("instances render once at mount"),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.node.core.dirty.get()
    }

    pub fn is_mounted(&self) -> bool {
        self.node.core.is_mounted()
    }

    /// Re-renders now, dirty or not.
    pub fn render(&self) {
        self.node.render();
    }

    pub fn scope(&self) -> Scope {
        self.node.core.scope.clone()
    }

    pub fn unmount(self) {}
}

impl<T: 'static> Drop for Instance<T> {
    fn drop(&mut self) {
        self.node.core.teardown();
    }
}

pub(crate) struct RuntimeShared {
    config: RuntimeConfig,
    pool: RefCell<LocalPool>,
    spawner: LocalSpawner,
    pub(crate) timers: TimerQueue,
    instances: RefCell<SlotMap<InstanceId, Weak<dyn Rerender>>>,
}

/// Single-threaded host for hook-based components.
///
/// Setters only mark their instance dirty; nothing re-renders until the
/// owner calls [`Runtime::flush`] or [`Runtime::pump`].
pub struct Runtime {
    shared: Rc<RuntimeShared>,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    pub fn new() -> Self {
        Self::with_config_and_clock(RuntimeConfig::default(), Rc::new(SystemClock))
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        Self::with_config_and_clock(config, Rc::new(SystemClock))
    }

    pub fn with_clock(clock: Rc<dyn Clock>) -> Self {
        Self::with_config_and_clock(RuntimeConfig::default(), clock)
    }

    pub fn with_config_and_clock(config: RuntimeConfig, clock: Rc<dyn Clock>) -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            shared: Rc::new(RuntimeShared {
                config,
                pool: RefCell::new(pool),
                spawner,
                timers: TimerQueue::new(clock),
                instances: RefCell::new(SlotMap::with_key()),
            }),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.shared.config
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.shared.timers
    }

    /// Mounts `body` as a new instance and renders it once.
    pub fn mount<T: 'static>(&self, body: impl FnMut() -> T + 'static) -> Instance<T> {
        let core = Rc::new(InstanceCore {
            id: Cell::new(None),
            composer: RefCell::new(Composer::default()),
            scope: Scope::new(),
            pending: RefCell::new(SmallVec::new()),
            dirty: Cell::new(false),
            mounted: Cell::new(true),
            runtime: Rc::downgrade(&self.shared),
        });
        let node = Rc::new(Node {
            core: core.clone(),
            body: RefCell::new(Box::new(body)),
            output: RefCell::new(None),
        });
        let weak: Weak<dyn Rerender> = Rc::downgrade(&node) as Weak<dyn Rerender>;
        let id = self.shared.instances.borrow_mut().insert(weak);
        core.id.set(Some(id));
        log::debug!("mounted instance {id:?}");

        node.render();
        Instance { node }
    }

    /// Re-renders dirty instances until none are left. Returns the number of
    /// renders performed.
    pub fn flush(&self) -> usize {
        self.flush_passes().0
    }

    fn flush_passes(&self) -> (usize, bool) {
        let mut renders = 0;
        for _ in 0..self.shared.config.max_render_passes {
            let dirty: Vec<Rc<dyn Rerender>> = self
                .shared
                .instances
                .borrow()
                .values()
                .filter_map(Weak::upgrade)
                .filter(|n| n.is_dirty())
                .collect();
            if dirty.is_empty() {
                return (renders, true);
            }
            for node in dirty {
                node.rerender();
                renders += 1;
            }
        }
        log::warn!(
            "render loop did not settle after {} passes; giving up until next flush",
            self.shared.config.max_render_passes
        );
        (renders, false)
    }

    /// Runs spawned tasks until none can make progress.
    pub fn run_until_stalled(&self) {
        self.shared.pool.borrow_mut().run_until_stalled();
    }

    /// Fires due timers, drives tasks and re-renders until quiescent.
    pub fn pump(&self) -> usize {
        let ticks = self.shared.timers.fire_due();
        if ticks > 0 {
            log::trace!("{ticks} timer tick(s) fired");
        }
        let mut renders = 0;
        loop {
            self.run_until_stalled();
            let (n, settled) = self.flush_passes();
            renders += n;
            if n == 0 || !settled {
                return renders;
            }
        }
    }

    pub fn instance_count(&self) -> usize {
        self.shared.instances.borrow().len()
    }
}
