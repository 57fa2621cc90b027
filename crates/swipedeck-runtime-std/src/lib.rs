//! Wall-clock frame loop for hosts without a platform vsync.
//!
//! [`StdRuntime`] stamps frames with the time since it was created and paces
//! them with [`StdRuntime::run_until_idle`]. A frame is drawn whenever a frame
//! callback is pending or something wrote state since the last frame.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use swipedeck_core::{Clock, Runtime, RuntimeHandle, RuntimeScheduler, FRAME_INTERVAL_NANOS};
use web_time::Instant;

/// Scheduler that remembers whether a frame was requested.
#[derive(Debug, Default)]
pub struct StdScheduler {
    frame_requested: AtomicBool,
}

impl StdScheduler {
    /// Returns whether a frame has been requested since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.frame_requested.swap(false, Ordering::SeqCst)
    }
}

impl RuntimeScheduler for StdScheduler {
    fn schedule_frame(&self) {
        self.frame_requested.store(true, Ordering::SeqCst);
    }
}

/// Monotonic clock backed by [`web_time::Instant`].
#[derive(Debug, Default, Clone, Copy)]
pub struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Self::Instant {
        Instant::now()
    }

    fn elapsed_nanos(&self, since: Self::Instant) -> u64 {
        u64::try_from(since.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

/// The frame loop drew its whole budget without the runtime going idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameBudgetExceeded {
    pub frames: usize,
}

impl fmt::Display for FrameBudgetExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "still animating after {} frames", self.frames)
    }
}

impl std::error::Error for FrameBudgetExceeded {}

pub struct StdRuntime {
    scheduler: Arc<StdScheduler>,
    clock: StdClock,
    runtime: Runtime,
    started_at: Instant,
    frame_interval: Duration,
}

impl StdRuntime {
    pub fn new() -> Self {
        let scheduler = Arc::new(StdScheduler::default());
        let runtime = Runtime::new(scheduler.clone());
        Self {
            scheduler,
            clock: StdClock,
            runtime,
            started_at: StdClock.now(),
            frame_interval: Duration::from_nanos(FRAME_INTERVAL_NANOS),
        }
    }

    /// Paces [`run_until_idle`](Self::run_until_idle) at `interval` instead of 60 FPS.
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Returns whether state changed or a callback was queued since the last poll.
    pub fn take_frame_request(&self) -> bool {
        self.scheduler.take_frame_request()
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.runtime.has_frame_callbacks()
    }

    /// Drains pending frame callbacks stamped with the time since this runtime was created.
    ///
    /// Returns the frame time that was used.
    pub fn pump_frame(&self) -> u64 {
        let now = self.clock.elapsed_nanos(self.started_at);
        self.runtime.drain_frame_callbacks(now);
        now
    }

    /// Draws frames on the wall clock until nothing is pending.
    ///
    /// `on_frame` runs after each drain with the frame time, standing in for
    /// the host's render pass. Returns how many frames were drawn.
    pub fn run_until_idle(
        &self,
        max_frames: usize,
        mut on_frame: impl FnMut(u64),
    ) -> Result<usize, FrameBudgetExceeded> {
        let mut frames = 0;
        let mut deadline = self.clock.now();
        loop {
            let requested = self.take_frame_request();
            if !requested && !self.has_frame_callbacks() {
                log::trace!("frame loop idle after {frames} frames");
                return Ok(frames);
            }
            if frames == max_frames {
                log::warn!("frame loop gave up after {frames} frames");
                return Err(FrameBudgetExceeded { frames });
            }

            deadline += self.frame_interval;
            let now = self.clock.now();
            if deadline > now {
                thread::sleep(deadline - now);
            } else {
                // Running behind; restart the cadence from here.
                deadline = now;
            }

            let frame_time = self.pump_frame();
            on_frame(frame_time);
            frames += 1;
        }
    }
}

impl fmt::Debug for StdRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdRuntime")
            .field("scheduler", &self.scheduler)
            .field("frame_interval", &self.frame_interval)
            .finish()
    }
}

impl Default for StdRuntime {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/std_runtime_tests.rs"]
mod tests;
