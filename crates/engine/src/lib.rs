//! Game engine: drives the pure core through time.
//!
//! The core never looks at a clock. This crate owns the countdown scheduler
//! and the [`Session`] that ties it to the controller, re-syncing after every
//! action so that pausing, switching mode or leaving a game always cancels
//! the running countdown. Game events are reported through the `log` facade.

pub mod countdown;
pub mod session;

pub use sumblocks_core as core;
pub use sumblocks_types as types;

pub use countdown::Countdown;
pub use session::Session;
