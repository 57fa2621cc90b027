//! Platform abstraction traits for the SwipeDeck runtime.
//!
//! These traits let the runtime delegate scheduling and clock
//! responsibilities to the host, so the same interaction models run under a
//! real event loop, a headless demo, or a deterministic test driver.

/// Schedules work for the runtime.
///
/// Implementations are responsible for triggering frame processing on behalf
/// of the runtime. They must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Provides timing information for the runtime.
pub trait Clock: Send + Sync {
    /// Instant type produced by this clock implementation.
    type Instant: Copy + Send + Sync;

    /// Returns the current instant.
    fn now(&self) -> Self::Instant;

    /// Returns the number of nanoseconds elapsed since `since`.
    fn elapsed_nanos(&self, since: Self::Instant) -> u64;
}

/// Scheduler that ignores frame requests.
///
/// Useful when the host polls [`crate::RuntimeHandle::has_frame_callbacks`]
/// instead of being woken.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopScheduler;

impl RuntimeScheduler for NoopScheduler {
    fn schedule_frame(&self) {}
}
