use grapple_core::prelude::*;
use grapple_hooks::use_state_with_history;

pub fn run() -> anyhow::Result<()> {
    let rt = Runtime::new();
    let page = rt.mount(|| use_state_with_history(|| 10));
    let controls = page.output().controls;

    let show = |step: &str| {
        let out = page.output();
        log::info!("{step:<14} value={:<3} history={:?}", out.value, out.history());
    };
    show("start");

    let steps: [(&str, &dyn Fn()); 11] = [
        ("setValue(15)", &|| controls.set(15)),
        ("setValue(20)", &|| controls.set(20)),
        ("goBack()", &|| controls.go_back()),
        ("goBack()", &|| controls.go_back()),
        ("goBack()", &|| controls.go_back()),
        ("goForward()", &|| controls.go_forward()),
        ("setValue(25)", &|| controls.set(25)),
        ("setValue(30)", &|| controls.set(30)),
        ("goBack()", &|| controls.go_back()),
        ("goForward()", &|| controls.go_forward()),
        ("goForward()", &|| controls.go_forward()),
    ];
    for (label, step) in steps {
        step();
        rt.flush();
        show(label);
    }
    Ok(())
}
