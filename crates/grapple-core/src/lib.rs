//! # Instances, State, and Effects
//!
//! Grapple's host is a small, single-threaded reactive runtime. Components
//! are plain closures mounted on a [`Runtime`]; inside them, hooks keep state
//! between renders and schedule side-effects with cleanup. There are four
//! main pieces:
//!
//! - `remember` / `use_state` / `use_ref` — slot storage bound to an instance.
//! - `use_effect` — deferred work keyed by a dependency value, with cleanup.
//! - `set_interval` / `spawn_local` — timers and async tasks owned by the runtime.
//! - `Signal<T>` — an observable cell for things outside any instance.
//!
//! ## Mounting
//!
//! ```rust
//! use grapple_core::*;
//!
//! let rt = Runtime::new();
//! let counter = rt.mount(|| {
//!     let (count, set_count) = use_state(|| 0);
//!     (count, set_count)
//! });
//!
//! let (_, set_count) = counter.output();
//! set_count.set(5);
//! rt.flush();
//! assert_eq!(counter.output().0, 5);
//! ```
//!
//! Setters never render synchronously: they mark their instance dirty and
//! the owner of the runtime decides when to [`Runtime::flush`] (re-render) or
//! [`Runtime::pump`] (fire timers, drive tasks, then re-render).
//!
//! ## Slots
//!
//! - `remember` is order‑based: the Nth call in a render always refers to the
//!   Nth stored value. Call hooks unconditionally and in the same order.
//! - `use_state` returns the value observed by this render plus a setter whose
//!   identity never changes for the lifetime of the instance.
//! - `use_ref` is a `Rc<RefCell<T>>` that survives renders and never triggers one.
//!
//! ## Effects and cleanup
//!
//! ```rust
//! use grapple_core::*;
//!
//! let rt = Runtime::new();
//! let view = rt.mount(|| {
//!     use_effect((), || {
//!         log::info!("mounted");
//!         on_unmount(|| log::info!("unmounted"))
//!     });
//! });
//! view.unmount();
//! ```
//!
//! - The effect body runs after the render body returns, and again only when
//!   `deps` compares unequal to the previous run's.
//! - The cleanup of the previous run always finishes before the next run and
//!   runs exactly once at teardown.
//!
//! Long-running work (timers, requests, subscriptions) belongs in effects so
//! that it is released when the instance that owns it goes away.

pub mod callback;
pub mod clock;
pub mod effects;
pub mod effects_ext;
pub mod prelude;
pub mod runtime;
pub mod scope;
pub mod signal;
pub mod state;
pub mod tests;
pub mod timer;

pub use callback::*;
pub use clock::*;
pub use effects::*;
pub use effects_ext::*;
pub use runtime::{Instance, InstanceId, Runtime, RuntimeConfig, remember, spawn_local};
pub use scope::*;
pub use signal::*;
pub use state::*;
pub use timer::*;

pub use web_time::{Duration, Instant};
