pub use crate::callback::Callback;
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::effects::{Dispose, on_unmount};
pub use crate::effects_ext::use_effect;
pub use crate::runtime::{Instance, Runtime, RuntimeConfig, remember, spawn_local};
pub use crate::scope::{Scope, current_scope, scoped_effect};
pub use crate::signal::{Signal, signal};
pub use crate::state::{SetState, use_ref, use_state};
pub use crate::timer::set_interval;
pub use web_time::{Duration, Instant};
