use std::rc::Rc;

use grapple_core::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// The viewport collaborator: current dimensions plus a resize signal.
pub trait Viewport: 'static {
    fn inner_size(&self) -> WindowSize;
    /// Subscribes `listener` to resize notifications until the guard runs.
    fn on_resize(&self, listener: Callback) -> Dispose;
}

/// A viewport whose size is set by hand. Platform glue forwards window
/// events into [`VirtualViewport::resize`]; tests call it directly.
#[derive(Clone)]
pub struct VirtualViewport {
    size: Signal<WindowSize>,
}

impl VirtualViewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: signal(WindowSize { width, height }),
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.size.set(WindowSize { width, height });
    }

    pub fn listener_count(&self) -> usize {
        self.size.subscriber_count()
    }
}

impl Viewport for VirtualViewport {
    fn inner_size(&self) -> WindowSize {
        self.size.get()
    }

    fn on_resize(&self, listener: Callback) -> Dispose {
        let id = self.size.subscribe(move |_| listener.emit(()));
        let size = self.size.clone();
        on_unmount(move || {
            size.unsubscribe(id);
        })
    }
}

/// Tracks the viewport's dimensions, re-reading both on every resize signal.
pub fn use_window_size(viewport: &Rc<dyn Viewport>) -> WindowSize {
    let (size, set_size) = use_state(|| viewport.inner_size());

    let viewport = viewport.clone();
    use_effect((), move || {
        let source = viewport.clone();
        viewport.on_resize(Callback::new(move |()| set_size.set(source.inner_size())))
    });

    size
}
