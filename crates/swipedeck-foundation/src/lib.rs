//! Pointer input and gesture recognition for SwipeDeck.

pub mod gesture_constants;
pub mod gestures;
pub mod types;

pub use gesture_constants::DRAG_THRESHOLD;
pub use gestures::{DragEvent, HorizontalDragDetector, TapDetector};
pub use types::{Point, PointerEvent, PointerEventKind, PointerId};

pub mod prelude {
    pub use super::gestures::{DragEvent, HorizontalDragDetector, TapDetector};
    pub use super::types::{Point, PointerEvent, PointerEventKind, PointerId};
}

#[cfg(test)]
#[path = "tests/gesture_tests.rs"]
mod tests;
