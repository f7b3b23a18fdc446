use grapple_core::prelude::*;
use grapple_hooks::{MapState, use_map};
use serde_json::{Value, json};

fn show(map: &MapState<String, Value>) {
    for key in ["test", "456", "789"] {
        let value = map.get(&key.to_string()).cloned().unwrap_or(Value::Null);
        log::info!("  map.get({key:?}) = {value}");
    }
}

pub fn run() -> anyhow::Result<()> {
    let rt = Runtime::new();
    let page = rt.mount(|| {
        use_map([
            ("test".to_string(), json!(123)),
            ("456".to_string(), json!("hello world")),
        ])
    });

    let initial = page.output();
    log::info!("initial");
    show(&initial);

    initial.set.emit(("789".to_string(), json!(true)));
    rt.flush();
    log::info!("after set(\"789\", true)");
    show(&page.output());

    page.output().delete.emit("456".to_string());
    rt.flush();
    log::info!("after delete(\"456\")");
    show(&page.output());

    page.output().clear.emit(());
    rt.flush();
    log::info!("after clear()");
    show(&page.output());

    let latest = page.output();
    log::info!(
        "mutators unchanged across renders: {}",
        initial.set == latest.set && initial.delete == latest.delete && initial.clear == latest.clear
    );
    Ok(())
}
