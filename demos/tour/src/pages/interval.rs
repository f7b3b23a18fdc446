use std::rc::Rc;

use grapple_core::prelude::*;
use grapple_hooks::use_interval;

fn say(clock: &Rc<ManualClock>, start: Instant, word: &'static str) -> Callback {
    let clock = clock.clone();
    Callback::new(move |()| {
        let t = clock.now().duration_since(start);
        log::info!("after {}s: {word}", t.as_secs());
    })
}

/// Replays the documented timeline on a manual clock, one second per step.
pub fn run() -> anyhow::Result<()> {
    let clock = Rc::new(ManualClock::new());
    let start = clock.now();
    let rt = Runtime::with_clock(clock.clone());

    let first = say(&clock, start, "First");
    let page = rt.mount(move || {
        let (func, set_func) = use_state(|| first.clone());
        let (delay, set_delay) = use_state(|| Some(Duration::from_secs(2)));
        use_interval(func, delay);
        (set_func, set_delay)
    });
    let (set_func, set_delay) = page.output();

    for second in 1..=9 {
        clock.advance(Duration::from_secs(1));
        match second {
            3 => {
                log::info!("after 3s: delay -> 3s");
                set_delay.set(Some(Duration::from_secs(3)));
            }
            7 => {
                log::info!("after 7s: callback -> Second");
                set_func.set(say(&clock, start, "Second"));
            }
            _ => {}
        }
        rt.pump();
    }

    set_delay.set(None);
    rt.pump();
    log::info!("delay -> None; {} timer(s) left", rt.timers().len());
    Ok(())
}
