//! Pure phase/time derivation. Every function takes `now` explicitly.

pub mod counts;
pub mod phase;
pub mod progress;
pub mod time_left;

pub use counts::describe_count;
pub use phase::{phase_message, resolve_phase};
pub use progress::{percent_complete, percent_complete_between};
pub use time_left::time_left;
