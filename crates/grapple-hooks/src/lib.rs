//! # Hooks
//!
//! Six self-contained hooks built on `grapple-core`. None of them talk to each
//! other; each one only needs a mounted instance and, where it touches the
//! outside world, a collaborator passed in by the caller:
//!
//! | hook | collaborator |
//! |------|--------------|
//! | [`use_fetch`] | [`Transport`] |
//! | [`use_local_storage`] | [`KeyValueStore`] |
//! | [`use_interval`] | the runtime's timer queue |
//! | [`use_state_with_history`] | — |
//! | [`use_map`] | — |
//! | [`use_window_size`] | [`Viewport`] |
//!
//! Failures never escape a hook: request failures land in
//! [`FetchState::error`], store failures are logged and fall back to the
//! initial value.
//!
//! ```rust
//! use grapple_core::prelude::*;
//! use grapple_hooks::*;
//!
//! let rt = Runtime::new();
//! let editor = rt.mount(|| use_state_with_history(|| 10));
//!
//! editor.output().controls.set(15);
//! rt.flush();
//! assert_eq!(editor.output().value, 15);
//! assert_eq!(editor.output().history(), vec![10, 15]);
//! ```

pub mod fetch;
pub mod history;
pub mod interval;
pub mod map;
pub mod storage;
pub mod window_size;

pub use fetch::{FetchError, FetchState, FixtureTransport, Response, Transport, use_fetch};
pub use history::{HistoryControls, HistoryLog, StateWithHistory, use_state_with_history};
pub use interval::use_interval;
pub use map::{MapState, use_map};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError, use_local_storage};
pub use window_size::{VirtualViewport, Viewport, WindowSize, use_window_size};
