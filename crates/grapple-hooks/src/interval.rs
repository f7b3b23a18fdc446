use grapple_core::prelude::*;

/// Calls the latest `callback` every `delay`.
///
/// Handing in a new callback swaps what the next tick calls without
/// touching the timer. Changing `delay` clears the timer and arms a fresh one,
/// so the first tick comes a full `delay` later. `None` stops ticking.
pub fn use_interval(callback: Callback, delay: Option<Duration>) {
    let latest = use_ref(|| callback.clone());

    {
        let latest = latest.clone();
        use_effect(callback.clone(), move || {
            *latest.borrow_mut() = callback;
            Dispose::none()
        });
    }

    use_effect(delay, move || match delay {
        None => Dispose::none(),
        Some(period) => set_interval(
            period,
            Callback::new(move |()| {
                let current = latest.borrow().clone();
                current.emit(());
            }),
        ),
    });
}
