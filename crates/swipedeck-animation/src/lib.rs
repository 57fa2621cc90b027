//! Animation system for SwipeDeck
//!
//! Provides time-based animations with easing curves, spring physics, and
//! piecewise-linear interpolation of animated values.

mod animation;
mod interpolation;

pub use animation::{
    Animatable, AnimationEnd, AnimationSpec, AnimationType, Easing, Lerp, SpringScalar,
    SpringSpec, WeakAnimatable,
};
pub use interpolation::{Extrapolate, Interpolation, InterpolationError};

#[cfg(test)]
#[path = "tests/interpolation_tests.rs"]
mod interpolation_tests;
