use std::rc::Rc;

use grapple_core::prelude::*;
use grapple_hooks::{VirtualViewport, Viewport, use_window_size};

pub fn run() -> anyhow::Result<()> {
    let viewport = VirtualViewport::new(1280, 800);
    let source: Rc<dyn Viewport> = Rc::new(viewport.clone());

    let rt = Runtime::new();
    let page = rt.mount(move || use_window_size(&source));
    let size = page.output();
    log::info!("width={} height={}", size.width, size.height);

    for (w, h) in [(1024, 768), (390, 844)] {
        viewport.resize(w, h);
        rt.flush();
        let size = page.output();
        log::info!("resized: width={} height={}", size.width, size.height);
    }

    page.unmount();
    viewport.resize(1920, 1080);
    log::info!(
        "after unmount: {} listener(s) left, {} render(s) on resize",
        viewport.listener_count(),
        rt.flush()
    );
    Ok(())
}
