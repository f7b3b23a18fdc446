use std::hash::Hash;
use std::rc::Rc;

use grapple_core::prelude::*;
use indexmap::IndexMap;

/// Snapshot of a [`use_map`] container plus its mutators.
///
/// `entries` is never mutated in place: every mutation builds a new map, so
/// a snapshot taken by an earlier render stays as it was. The three
/// callbacks are created once per instance and compare equal across renders.
pub struct MapState<K, V> {
    pub entries: Rc<IndexMap<K, V>>,
    pub set: Callback<(K, V)>,
    pub delete: Callback<K>,
    pub clear: Callback<()>,
}

impl<K, V> Clone for MapState<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            set: self.set.clone(),
            delete: self.delete.clone(),
            clear: self.clear.clone(),
        }
    }
}

impl<K: Hash + Eq, V> MapState<K, V> {
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }
}

struct MapActions<K, V> {
    set: Callback<(K, V)>,
    delete: Callback<K>,
    clear: Callback<()>,
}

/// An insertion-ordered map held in state.
///
/// `initial` is only consumed on the first render.
pub fn use_map<K, V>(initial: impl IntoIterator<Item = (K, V)>) -> MapState<K, V>
where
    K: Hash + Eq + Clone + 'static,
    V: Clone + 'static,
{
    let (entries, set_entries) =
        use_state(|| Rc::new(initial.into_iter().collect::<IndexMap<K, V>>()));

    let actions = remember(|| {
        let set = {
            let set_entries = set_entries.clone();
            Callback::new(move |(key, value): (K, V)| {
                set_entries.update(|prev| {
                    let mut next = IndexMap::clone(prev);
                    next.insert(key, value);
                    Rc::new(next)
                })
            })
        };
        let delete = {
            let set_entries = set_entries.clone();
            Callback::new(move |key: K| {
                if !set_entries.get().contains_key(&key) {
                    return;
                }
                set_entries.update(|prev| {
                    let mut next = IndexMap::clone(prev);
                    next.shift_remove(&key);
                    Rc::new(next)
                })
            })
        };
        let clear = Callback::new(move |()| set_entries.set(Rc::new(IndexMap::new())));
        MapActions { set, delete, clear }
    });

    MapState {
        entries,
        set: actions.set.clone(),
        delete: actions.delete.clone(),
        clear: actions.clear.clone(),
    }
}
