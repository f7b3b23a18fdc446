#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use futures::channel::oneshot;

    use crate::prelude::*;
    use crate::timer::{MIN_PERIOD, TimerQueue};

    fn manual_runtime() -> (Runtime, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new());
        (Runtime::with_clock(clock.clone()), clock)
    }

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let seen = Rc::new(Cell::new(0));

        let id = {
            let seen = seen.clone();
            let reader = sig.clone();
            // listeners may read the signal they observe
            sig.subscribe(move |v| {
                assert_eq!(reader.get(), *v);
                seen.set(*v);
            })
        };

        sig.set(42);
        assert_eq!(seen.get(), 42);

        assert!(sig.unsubscribe(id));
        assert_eq!(sig.subscriber_count(), 0);
        sig.set(7);
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn test_scope_dispose_runs_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let scope = Scope::new();
        scope.run(|| {
            for name in ["first", "second"] {
                let order = order.clone();
                scoped_effect(move || on_unmount(move || order.borrow_mut().push(name)));
            }
        });
        assert!(current_scope().is_none());
        assert_eq!(scope.disposer_count(), 2);

        assert!(order.borrow().is_empty());
        scope.dispose();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_dropped_scope_runs_leftover_disposers() {
        let ran = Rc::new(Cell::new(false));
        {
            let scope = Scope::new();
            let ran = ran.clone();
            scope.add_disposer(move || ran.set(true));
        }
        assert!(ran.get());
    }

    #[test]
    fn test_dispose_runs_once() {
        let count = Rc::new(Cell::new(0));
        let d = {
            let count = count.clone();
            on_unmount(move || count.set(count.get() + 1))
        };
        d.run();
        d.run();
        assert_eq!(count.get(), 1);
        assert!(d.is_spent());
    }

    #[test]
    fn test_callback_identity() {
        let a = Callback::new(|()| {});
        let b = Callback::new(|()| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_remember_is_stable_across_renders() {
        let rt = Runtime::new();
        let view = rt.mount(|| remember(|| RefCell::new(0)));

        let first = view.output();
        view.render();
        let second = view.output();
        assert!(Rc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_state_setter_rerenders_on_flush() {
        let rt = Runtime::new();
        let renders = Rc::new(Cell::new(0));
        let view = {
            let renders = renders.clone();
            rt.mount(move || {
                renders.set(renders.get() + 1);
                use_state(|| 1)
            })
        };
        assert_eq!(renders.get(), 1);

        let (value, set) = view.output();
        assert_eq!(value, 1);

        set.set(2);
        set.update(|v| v * 10);
        assert!(view.is_dirty());
        assert_eq!(view.output().0, 1);

        assert_eq!(rt.flush(), 1);
        assert_eq!(renders.get(), 2);
        assert_eq!(view.output().0, 20);
        // same setter handed back
        assert_eq!(view.output().1, set);
    }

    #[test]
    fn test_update_closure_may_write_same_state() {
        let rt = Runtime::new();
        let view = rt.mount(|| use_state(|| 1));
        let (_, set) = view.output();

        let inner = set.clone();
        set.update(move |v| {
            inner.set(v + 100);
            inner.get() + 1
        });
        rt.flush();
        assert_eq!(view.output().0, 102);
    }

    #[test]
    fn test_setter_after_unmount_is_ignored() {
        let rt = Runtime::new();
        let view = rt.mount(|| use_state(|| "a"));
        let (_, set) = view.output();

        view.unmount();
        set.set("b");
        assert_eq!(set.get(), "a");
        assert_eq!(rt.flush(), 0);
        assert_eq!(rt.instance_count(), 0);
    }

    #[test]
    fn test_use_ref_does_not_rerender() {
        let rt = Runtime::new();
        let view = rt.mount(|| use_ref(|| 0));
        *view.output().borrow_mut() = 5;
        assert!(!view.is_dirty());
        view.render();
        assert_eq!(*view.output().borrow(), 5);
    }

    #[test]
    fn test_effect_runs_on_dep_change_with_cleanup_first() {
        let rt = Runtime::new();
        let log = Rc::new(RefCell::new(Vec::<String>::new()));

        let view = {
            let log = log.clone();
            rt.mount(move || {
                let (dep, set_dep) = use_state(|| 1);
                let (_, set_other) = use_state(|| 0);
                let log = log.clone();
                use_effect(dep, move || {
                    log.borrow_mut().push(format!("run {dep}"));
                    on_unmount(move || log.borrow_mut().push(format!("cleanup {dep}")))
                });
                (set_dep, set_other)
            })
        };
        assert_eq!(*log.borrow(), vec!["run 1"]);

        let (set_dep, set_other) = view.output();

        // unrelated state change: effect does not re-run
        set_other.set(9);
        rt.flush();
        assert_eq!(*log.borrow(), vec!["run 1"]);

        set_dep.set(2);
        rt.flush();
        assert_eq!(*log.borrow(), vec!["run 1", "cleanup 1", "run 2"]);

        view.unmount();
        assert_eq!(
            *log.borrow(),
            vec!["run 1", "cleanup 1", "run 2", "cleanup 2"]
        );
    }

    #[test]
    fn test_effect_runs_after_body() {
        let rt = Runtime::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let _view = {
            let order = order.clone();
            rt.mount(move || {
                let o = order.clone();
                use_effect((), move || {
                    o.borrow_mut().push("effect");
                    Dispose::none()
                });
                order.borrow_mut().push("body");
            })
        };
        assert_eq!(*order.borrow(), vec!["body", "effect"]);
    }

    #[test]
    fn test_state_set_in_effect_settles() {
        let rt = Runtime::new();
        let view = rt.mount(|| {
            let (value, set) = use_state(|| 0);
            use_effect((), move || {
                set.set(1);
                Dispose::none()
            });
            value
        });
        assert_eq!(view.output(), 0);
        rt.flush();
        assert_eq!(view.output(), 1);
    }

    #[test]
    fn test_runaway_render_loop_is_cut_off() {
        let rt = Runtime::with_config(RuntimeConfig {
            max_render_passes: 3,
        });
        let view = rt.mount(|| {
            let (value, set) = use_state(|| 0u32);
            use_effect(value, move || {
                set.set(value + 1);
                Dispose::none()
            });
            value
        });
        assert_eq!(rt.flush(), 3);
        assert!(view.is_dirty());
    }

    #[test]
    fn test_timer_queue_fires_on_period() {
        let clock = Rc::new(ManualClock::new());
        let timers = TimerQueue::new(clock.clone());
        let ticks = Rc::new(Cell::new(0));

        let id = {
            let ticks = ticks.clone();
            timers.set_interval(
                Duration::from_millis(100),
                Callback::new(move |()| ticks.set(ticks.get() + 1)),
            )
        };

        clock.advance(Duration::from_millis(99));
        assert_eq!(timers.fire_due(), 0);
        clock.advance(Duration::from_millis(1));
        assert_eq!(timers.fire_due(), 1);

        // three periods overdue: catch up one tick per period
        clock.advance(Duration::from_millis(300));
        assert_eq!(timers.fire_due(), 3);
        assert_eq!(ticks.get(), 4);

        assert!(timers.clear(id));
        clock.advance(Duration::from_millis(500));
        assert_eq!(timers.fire_due(), 0);
        assert!(timers.is_empty());
    }

    #[test]
    fn test_timer_tick_slower_than_period_does_not_spin() {
        let clock = Rc::new(ManualClock::new());
        let timers = TimerQueue::new(clock.clone());
        let ticks = Rc::new(Cell::new(0));

        {
            let ticks = ticks.clone();
            let clock = clock.clone();
            timers.set_interval(
                MIN_PERIOD,
                Callback::new(move |()| {
                    ticks.set(ticks.get() + 1);
                    clock.advance(MIN_PERIOD * 2);
                }),
            );
        }

        clock.advance(MIN_PERIOD);
        assert_eq!(timers.fire_due(), 1);
        // the overrun pushed the next deadline a full period past the tick
        assert_eq!(timers.fire_due(), 0);
        clock.advance(MIN_PERIOD);
        assert_eq!(timers.fire_due(), 1);
        assert_eq!(ticks.get(), 2);
    }

    #[test]
    fn test_timer_fire_order_and_self_clear() {
        let clock = Rc::new(ManualClock::new());
        let timers = Rc::new(TimerQueue::new(clock.clone()));
        let order = Rc::new(RefCell::new(Vec::new()));

        let slow = {
            let order = order.clone();
            timers.set_interval(
                Duration::from_millis(30),
                Callback::new(move |()| order.borrow_mut().push("slow")),
            )
        };
        let fast_id = Rc::new(Cell::new(None));
        let fast = {
            let order = order.clone();
            let weak = Rc::downgrade(&timers);
            let fast_id = fast_id.clone();
            timers.set_interval(
                Duration::from_millis(20),
                Callback::new(move |()| {
                    order.borrow_mut().push("fast");
                    if let (Some(t), Some(id)) = (weak.upgrade(), fast_id.get()) {
                        t.clear(id);
                    }
                }),
            )
        };
        fast_id.set(Some(fast));

        clock.advance(Duration::from_millis(60));
        timers.fire_due();
        assert_eq!(*order.borrow(), vec!["fast", "slow", "slow"]);
        assert!(timers.clear(slow));
    }

    #[test]
    fn test_set_interval_inside_effect_is_cleared_on_unmount() {
        let (rt, clock) = manual_runtime();
        let ticks = Rc::new(Cell::new(0));

        let view = {
            let ticks = ticks.clone();
            rt.mount(move || {
                let ticks = ticks.clone();
                use_effect((), move || {
                    set_interval(
                        Duration::from_secs(1),
                        Callback::new(move |()| ticks.set(ticks.get() + 1)),
                    )
                });
            })
        };
        assert_eq!(rt.timers().len(), 1);

        clock.advance(Duration::from_secs(2));
        rt.pump();
        assert_eq!(ticks.get(), 2);

        view.unmount();
        assert!(rt.timers().is_empty());
        clock.advance(Duration::from_secs(5));
        rt.pump();
        assert_eq!(ticks.get(), 2);
    }

    #[test]
    fn test_spawned_task_settles_state_on_pump() {
        let rt = Runtime::new();
        let (tx, rx) = oneshot::channel::<u32>();
        let rx = Rc::new(RefCell::new(Some(rx)));

        let view = {
            let rx = rx.clone();
            rt.mount(move || {
                let (value, set) = use_state(|| None::<u32>);
                let rx = rx.clone();
                use_effect((), move || {
                    if let Some(rx) = rx.borrow_mut().take() {
                        spawn_local(async move {
                            if let Ok(v) = rx.await {
                                set.set(Some(v));
                            }
                        });
                    }
                    Dispose::none()
                });
                value
            })
        };

        rt.pump();
        assert_eq!(view.output(), None);

        tx.send(7).unwrap();
        assert_eq!(rt.pump(), 1);
        assert_eq!(view.output(), Some(7));
    }
}
