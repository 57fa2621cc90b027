//! Shared gesture constants for consistent touch/pointer handling.
//!
//! Values are in logical pixels.

/// Distance a pointer may travel from its press position and still count as a tap.
///
/// Matches the usual platform touch slop (Android uses ~8dp).
pub const DRAG_THRESHOLD: f32 = 8.0;
