//! Core runtime for the SwipeDeck interaction models.
//!
//! Provides the single-threaded frame-callback queue that drives animations,
//! the [`FrameClock`] used to register per-frame work, and observable
//! [`MutableState`] cells read by renderers.

mod frame_clock;
mod platform;
mod runtime;
mod state;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use platform::{Clock, NoopScheduler, RuntimeScheduler};
pub use runtime::{Runtime, RuntimeHandle};
pub use state::{MutableState, State};

pub(crate) type FrameCallbackId = u64;

/// Nanoseconds between frames at 60 FPS.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;

/// Creates a runtime whose scheduler ignores frame requests.
pub fn headless_runtime() -> Runtime {
    Runtime::new(std::sync::Arc::new(NoopScheduler))
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
