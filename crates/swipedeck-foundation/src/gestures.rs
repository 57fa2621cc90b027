//! Single-pointer gesture recognisers.
//!
//! Both detectors track one pointer at a time. Samples from any other
//! pointer while one is tracked are ignored.

use crate::gesture_constants::DRAG_THRESHOLD;
use crate::types::{Point, PointerEvent, PointerEventKind, PointerId};

/// Recognised horizontal drag, expressed as displacement from the press point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    Started,
    Moved { delta_x: f32 },
    Ended { delta_x: f32 },
    Cancelled,
}

#[derive(Clone, Copy, Debug)]
struct Tracked {
    id: PointerId,
    origin: Point,
    last_delta_x: f32,
}

/// Turns raw pointer samples into [`DragEvent`]s.
#[derive(Debug, Default)]
pub struct HorizontalDragDetector {
    tracked: Option<Tracked>,
}

impl HorizontalDragDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.tracked.is_some()
    }

    pub fn reset(&mut self) {
        self.tracked = None;
    }

    pub fn handle(&mut self, event: &PointerEvent) -> Option<DragEvent> {
        match (event.kind, self.tracked) {
            (PointerEventKind::Down, None) => {
                self.tracked = Some(Tracked {
                    id: event.id,
                    origin: event.position,
                    last_delta_x: 0.0,
                });
                Some(DragEvent::Started)
            }
            (PointerEventKind::Down, Some(tracked)) => {
                log::debug!(
                    "ignoring pointer {} down while tracking pointer {}",
                    event.id,
                    tracked.id
                );
                None
            }
            (_, Some(tracked)) if tracked.id != event.id => None,
            (PointerEventKind::Move, Some(mut tracked)) => {
                let delta_x = event.position.x - tracked.origin.x;
                tracked.last_delta_x = delta_x;
                self.tracked = Some(tracked);
                Some(DragEvent::Moved { delta_x })
            }
            (PointerEventKind::Up, Some(tracked)) => {
                self.tracked = None;
                Some(DragEvent::Ended {
                    delta_x: event.position.x - tracked.origin.x,
                })
            }
            (PointerEventKind::Cancel, Some(_)) => {
                self.tracked = None;
                Some(DragEvent::Cancelled)
            }
            (_, None) => None,
        }
    }

    /// Horizontal displacement of the last move, if a drag is in progress.
    pub fn current_delta_x(&self) -> Option<f32> {
        self.tracked.map(|tracked| tracked.last_delta_x)
    }
}

/// Reports a tap when a pointer is released close to where it went down.
#[derive(Debug, Default)]
pub struct TapDetector {
    pressed: Option<(PointerId, Point)>,
    slop_exceeded: bool,
}

impl TapDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `event` completes a tap.
    pub fn handle(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                if self.pressed.is_none() {
                    self.pressed = Some((event.id, event.position));
                    self.slop_exceeded = false;
                }
                false
            }
            PointerEventKind::Move => {
                if let Some((id, origin)) = self.pressed {
                    if id == event.id && origin.distance_to(event.position) > DRAG_THRESHOLD {
                        self.slop_exceeded = true;
                    }
                }
                false
            }
            PointerEventKind::Up => match self.pressed {
                Some((id, origin)) if id == event.id => {
                    self.pressed = None;
                    !self.slop_exceeded && origin.distance_to(event.position) <= DRAG_THRESHOLD
                }
                _ => false,
            },
            PointerEventKind::Cancel => {
                self.pressed = None;
                false
            }
        }
    }
}
