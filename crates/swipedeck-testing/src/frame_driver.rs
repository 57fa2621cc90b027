use std::fmt;

use swipedeck_core::{headless_runtime, Runtime, RuntimeHandle, FRAME_INTERVAL_NANOS};

/// Upper bound used by [`FrameDriver::run_until_idle`].
const DEFAULT_MAX_FRAMES: usize = 600;

/// Deterministic frame pump over a headless [`Runtime`].
///
/// # Example
///
/// ```
/// use swipedeck_testing::FrameDriver;
///
/// let mut driver = FrameDriver::new();
/// let _registration = driver.handle().frame_clock().with_frame_nanos(|_| {});
/// assert_eq!(driver.run_until_idle().unwrap(), 1);
/// ```
pub struct FrameDriver {
    runtime: Runtime,
    frame_time_nanos: u64,
    frame_interval_nanos: u64,
    frames: usize,
}

/// Returned when the runtime still had frame callbacks after the frame budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleTimeout {
    pub frames: usize,
}

impl fmt::Display for IdleTimeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "runtime still busy after {} frames", self.frames)
    }
}

impl std::error::Error for IdleTimeout {}

impl FrameDriver {
    pub fn new() -> Self {
        Self::with_runtime(headless_runtime())
    }

    pub fn with_runtime(runtime: Runtime) -> Self {
        Self {
            runtime,
            frame_time_nanos: 0,
            frame_interval_nanos: FRAME_INTERVAL_NANOS,
            frames: 0,
        }
    }

    /// Overrides the spacing between frames (60 FPS by default).
    pub fn with_frame_interval(mut self, interval_nanos: u64) -> Self {
        self.frame_interval_nanos = interval_nanos.max(1);
        self
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Timestamp of the most recently drained frame.
    pub fn frame_time_nanos(&self) -> u64 {
        self.frame_time_nanos
    }

    /// Total frames drained so far.
    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn is_idle(&self) -> bool {
        !self.runtime.has_frame_callbacks()
    }

    /// Drains one frame, one interval after the previous one.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += self.frame_interval_nanos;
        self.frames += 1;
        self.runtime.drain_frame_callbacks(self.frame_time_nanos);
    }

    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Drains frames until at least `millis` of frame time has elapsed.
    pub fn advance_millis(&mut self, millis: u64) {
        let until = self.frame_time_nanos + millis * 1_000_000;
        while self.frame_time_nanos < until {
            self.advance_frame();
        }
    }

    /// Drains frames until no callbacks remain, returning how many frames ran.
    pub fn run_until_idle(&mut self) -> Result<usize, IdleTimeout> {
        self.run_until_idle_within(DEFAULT_MAX_FRAMES)
    }

    pub fn run_until_idle_within(&mut self, max_frames: usize) -> Result<usize, IdleTimeout> {
        let mut ran = 0;
        while !self.is_idle() {
            if ran == max_frames {
                log::warn!("frame driver gave up after {ran} frames");
                return Err(IdleTimeout { frames: ran });
            }
            self.advance_frame();
            ran += 1;
        }
        Ok(ran)
    }

    /// Drains frames until `condition` holds or the runtime goes idle.
    ///
    /// Returns whether the condition was met.
    pub fn run_until(&mut self, mut condition: impl FnMut() -> bool) -> bool {
        let mut ran = 0;
        while !condition() {
            if self.is_idle() || ran == DEFAULT_MAX_FRAMES {
                return false;
            }
            self.advance_frame();
            ran += 1;
        }
        true
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new()
    }
}
