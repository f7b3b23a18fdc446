//! Key-value stores and `use_local_storage`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use grapple_core::prelude::*;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("store contents are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// String-keyed, string-valued persistent store.
pub trait KeyValueStore: 'static {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store; lives as long as the handle.
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store backed by one JSON object file. The whole file is rewritten on
/// every `set_item`; a missing file is an empty store.
pub struct FileStore {
    path: PathBuf,
    items: RefCell<BTreeMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let items = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("opened store {} ({} keys)", path.display(), items.len());
        Ok(Self {
            path,
            items: RefCell::new(items),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut next = self.items.borrow().clone();
        next.insert(key.to_string(), value.to_string());
        let text = serde_json::to_string_pretty(&next)?;
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, text)?;
        // Only what reached the disk becomes visible.
        *self.items.borrow_mut() = next;
        Ok(())
    }
}

/// Reads `key`, treating absence, JSON `null` and any failure as "nothing
/// stored".
fn read_stored<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get_item(key) {
        Ok(raw) => raw?,
        Err(e) => {
            log::warn!("reading {key:?} failed, using initial value: {e}");
            return None;
        }
    };
    let parsed = serde_json::from_str::<Value>(&raw)
        .and_then(|value| match value {
            Value::Null => Ok(None),
            value => serde_json::from_value(value).map(Some),
        });
    match parsed {
        Ok(value) => value,
        Err(e) => {
            log::warn!("stored {key:?} does not decode, using initial value: {e}");
            None
        }
    }
}

fn write_stored<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(StoreError::from)
        .and_then(|text| store.set_item(key, &text));
    match result {
        Ok(()) => log::debug!("stored {key:?}"),
        Err(e) => log::warn!("writing {key:?} failed: {e}"),
    }
}

/// State mirrored into `store` under `key`.
///
/// The stored value wins over `init` when one is present. The current value
/// is written on mount and after every change. `key` is expected to stay
/// fixed; if it does change, the current value is written under the new key
/// without re-reading it.
pub fn use_local_storage<T>(
    store: &Rc<dyn KeyValueStore>,
    key: &str,
    init: impl FnOnce() -> T,
) -> (T, SetState<T>)
where
    T: Serialize + DeserializeOwned + Clone + PartialEq + 'static,
{
    let (value, set_value) = use_state(|| read_stored(store.as_ref(), key).unwrap_or_else(init));

    let store = store.clone();
    let key = key.to_string();
    let stored = value.clone();
    use_effect((key.clone(), value.clone()), move || {
        write_stored(store.as_ref(), &key, &stored);
        Dispose::none()
    });

    (value, set_value)
}
