use std::cell::{Cell, RefCell};

use crate::runtime::after_render;
use crate::{Dispose, on_unmount, remember, scoped_effect};

/// Runs `effect` after the render whenever `deps` changed; the previous
/// cleanup runs first. The last cleanup runs on teardown.
///
/// Pass `()` as `deps` to run once per instance.
pub fn use_effect<K: PartialEq + 'static>(deps: K, effect: impl FnOnce() -> Dispose + 'static) {
    let last_deps = remember(|| RefCell::new(None::<K>));
    let cleanup_slot = remember(|| RefCell::new(None::<Dispose>));
    let installed = remember(|| Cell::new(false));

    // Install a single unmount disposer for this callsite.
    if !installed.replace(true) {
        let cleanup_slot = cleanup_slot.clone();
        scoped_effect(move || {
            on_unmount(move || {
                let cleanup = cleanup_slot.borrow_mut().take();
                if let Some(d) = cleanup {
                    d.run();
                }
            })
        });
    }

    let changed = last_deps.borrow().as_ref() != Some(&deps);
    if changed {
        *last_deps.borrow_mut() = Some(deps);

        after_render(move || {
            let previous = cleanup_slot.borrow_mut().take();
            if let Some(d) = previous {
                d.run();
            }

            let d = effect();
            *cleanup_slot.borrow_mut() = Some(d);
        });
    }
}
