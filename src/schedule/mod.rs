//! Time- and ordering-sensitive plumbing: debounced value updates and
//! request tokens that let late completions be discarded.
//!
//! Nothing here spawns threads or timers. The owner polls with an explicit
//! `now`, which keeps behavior deterministic under test.

mod debounce;
mod token;

pub use debounce::Debouncer;
pub use token::{RequestToken, RequestTracker};
