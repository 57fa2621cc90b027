//! Testing utilities for SwipeDeck
//!
//! [`FrameDriver`] owns a headless runtime and advances it in fixed frame
//! steps, so animation tests are deterministic and never sleep.

mod frame_driver;

pub use frame_driver::{FrameDriver, IdleTimeout};

pub mod prelude {
    pub use crate::frame_driver::{FrameDriver, IdleTimeout};
}
