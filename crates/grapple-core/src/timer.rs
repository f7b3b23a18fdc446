use std::cell::{Cell, RefCell};
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};
use web_time::{Duration, Instant};

use crate::{Callback, Clock, Dispose, runtime};

new_key_type! {
    pub struct TimerId;
}

/// Shortest period a timer may have; anything below is clamped.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

struct TimerEntry {
    period: Duration,
    deadline: Instant,
    seq: u64,
    tick: Callback,
}

/// Recurring timers measured against an injected [`Clock`].
///
/// Nothing fires on its own: the owner calls [`TimerQueue::fire_due`] (the
/// runtime does so from `pump`), which runs every timer whose deadline has
/// passed, earliest first. A timer that is several periods overdue fires
/// once per elapsed period.
pub struct TimerQueue {
    clock: Rc<dyn Clock>,
    timers: RefCell<SlotMap<TimerId, TimerEntry>>,
    next_seq: Cell<u64>,
}

impl TimerQueue {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            clock,
            timers: RefCell::new(SlotMap::with_key()),
            next_seq: Cell::new(0),
        }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn set_interval(&self, period: Duration, tick: Callback) -> TimerId {
        let period = period.max(MIN_PERIOD);
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        let id = self.timers.borrow_mut().insert(TimerEntry {
            period,
            deadline: self.clock.now() + period,
            seq,
            tick,
        });
        log::trace!("timer {id:?} armed every {period:?}");
        id
    }

    pub fn clear(&self, id: TimerId) -> bool {
        let removed = self.timers.borrow_mut().remove(id).is_some();
        if removed {
            log::trace!("timer {id:?} cleared");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.timers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fires every timer due as of the call and returns how many ticks ran.
    ///
    /// Catch-up only covers time that had passed before the call. A tick
    /// that runs past its timer's next deadline pushes that deadline to one
    /// full period after the tick returned.
    pub fn fire_due(&self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;
        loop {
            let due = {
                let mut timers = self.timers.borrow_mut();
                let next = timers
                    .iter()
                    .filter(|(_, t)| t.deadline <= now)
                    .min_by_key(|(_, t)| (t.deadline, t.seq))
                    .map(|(id, _)| id);
                next.and_then(|id| {
                    let t = timers.get_mut(id)?;
                    t.deadline += t.period;
                    Some((id, t.tick.clone()))
                })
            };
            // Borrow released: a tick may clear or arm timers.
            let Some((id, tick)) = due else { break };
            tick.emit(());
            fired += 1;

            let after = self.clock.now();
            if after > now {
                if let Some(t) = self.timers.borrow_mut().get_mut(id) {
                    if t.deadline <= after {
                        log::debug!("timer {id:?} tick overran its period; skipping ahead");
                        t.deadline = after + t.period;
                    }
                }
            }
        }
        fired
    }
}

/// Arms a recurring timer on the current runtime; the returned guard clears it.
///
/// Must be called while an instance renders or runs its effects. Elsewhere
/// it logs a warning and arms nothing.
pub fn set_interval(period: Duration, tick: Callback) -> Dispose {
    let Some(rt) = runtime::current_runtime() else {
        log::warn!("set_interval called outside of a mounted instance; no timer armed");
        return Dispose::none();
    };
    let id = rt.timers.set_interval(period, tick);
    let rt = Rc::downgrade(&rt);
    Dispose::new(move || {
        if let Some(rt) = rt.upgrade() {
            rt.timers.clear(id);
        }
    })
}
