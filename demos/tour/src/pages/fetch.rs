use std::rc::Rc;

use grapple_core::prelude::*;
use grapple_hooks::{FetchState, FixtureTransport, Transport, use_fetch};

fn describe(state: &FetchState) -> String {
    match (&state.error, state.loading, &state.data) {
        (Some(e), _, _) => format!("Error: {e}"),
        (None, true, _) => "Loading...".to_string(),
        (None, false, Some(data)) => format!("Response: {data}"),
        (None, false, None) => "Response: null".to_string(),
    }
}

pub fn run() -> anyhow::Result<()> {
    let transport: Rc<dyn Transport> = Rc::new(
        FixtureTransport::new()
            .route("/todos/1", r#"{"id": 1, "title": "read the docs", "done": true}"#)
            .route("/todos/2", r#"{"id": 2, "title": "write a hook", "done": false}"#)
            .route("/broken", "<!doctype html>"),
    );

    let rt = Runtime::new();
    let fetcher = rt.mount(move || {
        let (url, set_url) = use_state(|| "/todos/1".to_string());
        (use_fetch(&transport, &url), set_url)
    });

    log::info!("mounted: {}", describe(&fetcher.output().0));
    rt.pump();
    log::info!("settled: {}", describe(&fetcher.output().0));

    let (_, set_url) = fetcher.output();
    for url in ["/todos/2", "/broken", "/missing"] {
        set_url.set(url.to_string());
        rt.flush();
        log::info!("{url}: {}", describe(&fetcher.output().0));
        rt.pump();
        log::info!("{url}: {}", describe(&fetcher.output().0));
    }
    Ok(())
}
