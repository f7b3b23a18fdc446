use std::rc::Rc;

use grapple_core::prelude::*;
use grapple_hooks::{FileStore, KeyValueStore, use_local_storage};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    visits: u32,
}

pub fn run() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join("grapple-tour").join("store.json");
    let store: Rc<dyn KeyValueStore> = Rc::new(FileStore::open(&path)?);
    log::info!("store file: {}", path.display());

    let rt = Runtime::new();
    let page = rt.mount(move || use_local_storage(&store, "profile", Profile::default));

    let (profile, set_profile) = page.output();
    log::info!("loaded {profile:?}");

    set_profile.update(|p| Profile {
        name: if p.name.is_empty() {
            "Ada".to_string()
        } else {
            p.name.clone()
        },
        visits: p.visits + 1,
    });
    rt.flush();
    log::info!("saved {:?}; run the tour again to see it reloaded", page.output().0);
    Ok(())
}
