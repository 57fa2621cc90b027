//! Interaction models for the SwipeDeck demos.
//!
//! [`SwipeDeck`] turns a horizontal drag into like/dismiss decisions with
//! spring-driven settling. [`AnimatedBox`] toggles between two positions on
//! tap. Both are headless: a renderer polls their read accessors each frame
//! while the host drains the runtime's frame callbacks.

mod animated_box;
mod card_content;
mod deck_config;
mod error;
mod swipe_deck;

pub use animated_box::{AnimatedBox, AnimatedBoxConfig};
pub use card_content::{CardContentProvider, IconCatalog, OverflowPolicy};
pub use deck_config::SwipeDeckConfig;
pub use error::DeckConfigError;
pub use swipe_deck::{DeckPhase, DerivedVisuals, SwipeDeck, SwipeDirection, SwipeOutcome};

pub use swipedeck_animation::{AnimationSpec, Easing, Extrapolate, SpringSpec};
pub use swipedeck_core::{Runtime, RuntimeHandle};
pub use swipedeck_foundation::{DragEvent, PointerEvent, PointerEventKind};

#[cfg(test)]
#[path = "tests/swipe_deck_tests.rs"]
mod swipe_deck_tests;

#[cfg(test)]
#[path = "tests/animated_box_tests.rs"]
mod animated_box_tests;
