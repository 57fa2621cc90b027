//! Card deck driven by a one-dimensional horizontal drag.
//!
//! The deck owns two animated channels, the top card's horizontal `offset`
//! and its `press_scale`, plus the index of the card on top. Renderers read
//! [`SwipeDeck::visuals`] every frame; everything in it is derived from the
//! two channels on the spot.
//!
//! # Phases
//!
//! ```text
//!            begin_gesture / update_gesture
//!   Idle ───────────────────────────────────► Dragging
//!    ▲                                          │
//!    │ both channels at rest                    │ end_gesture(|dx| <= limit)
//!    ├──────────────────────── SnappingBack ◄───┤ cancel_gesture
//!    │                                          │
//!    │ offset reached offscreen, index += 1     │ end_gesture(|dx| > limit)
//!    └──────────────────────── Dismissing ◄─────┘ dismiss(direction)
//! ```
//!
//! Starting any gesture operation supersedes whatever animation the touched
//! channel was running.

use std::cell::Cell;
use std::rc::Rc;

use swipedeck_animation::{Animatable, AnimationEnd, AnimationType, Extrapolate, Interpolation};
use swipedeck_core::{MutableState, RuntimeHandle, State};
use swipedeck_foundation::{DragEvent, HorizontalDragDetector, PointerEvent};

use crate::card_content::CardContentProvider;
use crate::deck_config::SwipeDeckConfig;
use crate::error::DeckConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    fn sign(self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeOutcome {
    Dismissed(SwipeDirection),
    SnappedBack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckPhase {
    /// Top card at rest in the center.
    Idle,
    Dragging,
    /// Returning to center without advancing.
    SnappingBack,
    Dismissing(SwipeDirection),
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DerivedVisuals {
    pub offset: f32,
    pub rotation_degrees: f32,
    pub next_card_scale: f32,
    pub current_card_scale: f32,
    pub card_index: usize,
}

pub struct SwipeDeck {
    config: SwipeDeckConfig,
    offset: Animatable<f32>,
    press_scale: Animatable<f32>,
    card_index: MutableState<usize>,
    phase: Rc<Cell<DeckPhase>>,
    rotation: Interpolation,
    next_scale: Interpolation,
    drag: HorizontalDragDetector,
}

impl SwipeDeck {
    pub fn new(config: SwipeDeckConfig, runtime: RuntimeHandle) -> Result<Self, DeckConfigError> {
        config.validate()?;

        let offscreen = config.offscreen_distance();
        let max_rotation = config.max_rotation_degrees;
        let rotation = Interpolation::new(&[-offscreen, offscreen], &[-max_rotation, max_rotation])?
            .with_extrapolate(config.rotation_extrapolate);
        let next_scale = Interpolation::new(
            &[-offscreen, 0.0, offscreen],
            &[1.0, config.min_next_card_scale, 1.0],
        )?
        .with_extrapolate(Extrapolate::Clamp);

        log::debug!(
            "swipe deck ready: width {}, dismiss beyond {}, offscreen at {}",
            config.reference_width,
            config.dismiss_limit(),
            offscreen
        );

        Ok(Self {
            config,
            offset: Animatable::with_label(0.0, runtime.clone(), "deck.offset"),
            press_scale: Animatable::with_label(1.0, runtime.clone(), "deck.press_scale"),
            card_index: MutableState::with_runtime(0, runtime),
            phase: Rc::new(Cell::new(DeckPhase::Idle)),
            rotation,
            next_scale,
            drag: HorizontalDragDetector::new(),
        })
    }

    pub fn config(&self) -> &SwipeDeckConfig {
        &self.config
    }

    /// Pointer went down on the top card.
    pub fn begin_gesture(&self) {
        // A grabbed card stops wherever it is.
        if self.offset.is_running() {
            self.offset.snap_to(self.offset.value());
        }
        self.phase.set(DeckPhase::Dragging);
        self.press_scale
            .animate_to(self.config.pressed_scale, self.spring());
    }

    /// Pointer moved to `delta_x` from where it went down.
    pub fn update_gesture(&self, delta_x: f32) {
        if !delta_x.is_finite() {
            log::warn!("ignoring non-finite drag delta {delta_x}");
            return;
        }
        if self.phase.get() != DeckPhase::Dragging {
            log::debug!("drag update without a press, phase {:?}", self.phase.get());
            self.phase.set(DeckPhase::Dragging);
        }
        self.offset.snap_to(delta_x);
    }

    /// Pointer released at `delta_x`; decides between dismissal and snap-back.
    pub fn end_gesture(&self, delta_x: f32) -> SwipeOutcome {
        let outcome = self.classify(delta_x);
        log::debug!("gesture released at {delta_x}: {outcome:?}");
        match outcome {
            SwipeOutcome::Dismissed(direction) => self.dismiss(direction),
            SwipeOutcome::SnappedBack => self.snap_back(),
        }
        outcome
    }

    /// Host cancelled the pointer stream; the card goes back to center.
    pub fn cancel_gesture(&self) {
        log::debug!("gesture cancelled");
        self.snap_back();
    }

    /// Throws the top card off screen, advancing the deck once it lands.
    pub fn dismiss(&self, direction: SwipeDirection) {
        self.phase.set(DeckPhase::Dismissing(direction));
        let target = direction.sign() * self.config.offscreen_distance();

        let offset = self.offset.downgrade();
        let press_scale = self.press_scale.downgrade();
        let card_index = self.card_index.clone();
        let phase = Rc::clone(&self.phase);
        self.offset
            .animate_to_then(target, self.spring(), move |end| match end {
                AnimationEnd::Finished => {
                    if let Some(offset) = offset.upgrade() {
                        offset.snap_to(0.0);
                    }
                    if let Some(press_scale) = press_scale.upgrade() {
                        press_scale.snap_to(1.0);
                    }
                    let index = card_index.update(|index| {
                        *index += 1;
                        *index
                    });
                    phase.set(DeckPhase::Idle);
                    log::debug!("card dismissed {direction:?}, now showing card {index}");
                }
                AnimationEnd::Interrupted => {
                    log::debug!("dismissal {direction:?} superseded");
                }
            });
    }

    /// Routes a recognised drag to the gesture operations.
    pub fn handle_drag(&self, event: DragEvent) -> Option<SwipeOutcome> {
        match event {
            DragEvent::Started => {
                self.begin_gesture();
                None
            }
            DragEvent::Moved { delta_x } => {
                self.update_gesture(delta_x);
                None
            }
            DragEvent::Ended { delta_x } => Some(self.end_gesture(delta_x)),
            DragEvent::Cancelled => {
                self.cancel_gesture();
                None
            }
        }
    }

    /// Feeds a raw pointer sample through the deck's drag detector.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<SwipeOutcome> {
        let drag = self.drag.handle(event)?;
        self.handle_drag(drag)
    }

    pub fn offset(&self) -> f32 {
        self.offset.value()
    }

    pub fn press_scale(&self) -> f32 {
        self.press_scale.value()
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation.map(self.offset())
    }

    pub fn next_card_scale(&self) -> f32 {
        self.next_scale.map(self.offset())
    }

    pub fn current_card_scale(&self) -> f32 {
        self.press_scale()
    }

    pub fn card_index(&self) -> usize {
        self.card_index.value()
    }

    pub fn phase(&self) -> DeckPhase {
        self.phase.get()
    }

    /// Resting at center with nothing left to animate.
    pub fn is_settled(&self) -> bool {
        self.phase.get() == DeckPhase::Idle
            && !self.offset.is_running()
            && !self.press_scale.is_running()
    }

    pub fn visuals(&self) -> DerivedVisuals {
        let offset = self.offset();
        DerivedVisuals {
            offset,
            rotation_degrees: self.rotation.map(offset),
            next_card_scale: self.next_scale.map(offset),
            current_card_scale: self.press_scale(),
            card_index: self.card_index(),
        }
    }

    pub fn offset_state(&self) -> State<f32> {
        self.offset.state()
    }

    pub fn press_scale_state(&self) -> State<f32> {
        self.press_scale.state()
    }

    pub fn card_index_state(&self) -> State<usize> {
        self.card_index.as_state()
    }

    pub fn current_content<'p, P: CardContentProvider>(
        &self,
        provider: &'p P,
    ) -> Option<&'p P::Content> {
        provider.content(self.card_index())
    }

    pub fn next_content<'p, P: CardContentProvider>(
        &self,
        provider: &'p P,
    ) -> Option<&'p P::Content> {
        provider.content(self.card_index() + 1)
    }

    fn classify(&self, delta_x: f32) -> SwipeOutcome {
        if !delta_x.is_finite() {
            log::warn!("released with non-finite delta {delta_x}, snapping back");
            return SwipeOutcome::SnappedBack;
        }
        let limit = self.config.dismiss_limit();
        if delta_x < -limit {
            SwipeOutcome::Dismissed(SwipeDirection::Left)
        } else if delta_x > limit {
            SwipeOutcome::Dismissed(SwipeDirection::Right)
        } else {
            SwipeOutcome::SnappedBack
        }
    }

    fn snap_back(&self) {
        self.phase.set(DeckPhase::SnappingBack);
        let remaining = Rc::new(Cell::new(2u8));

        let settle = {
            let phase = Rc::clone(&self.phase);
            move |end: AnimationEnd| {
                if !end.is_finished() {
                    return;
                }
                remaining.set(remaining.get().saturating_sub(1));
                if remaining.get() == 0 && phase.get() == DeckPhase::SnappingBack {
                    phase.set(DeckPhase::Idle);
                    log::debug!("card back at rest");
                }
            }
        };
        let settle_offset = settle.clone();

        self.press_scale
            .animate_to_then(1.0, self.spring(), settle);
        self.offset
            .animate_to_then(0.0, self.spring(), settle_offset);
    }

    fn spring(&self) -> AnimationType {
        AnimationType::Spring(self.config.spring)
    }
}
