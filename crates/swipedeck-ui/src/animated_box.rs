//! A box that jumps between a low and a high resting position on tap.
//!
//! The box rests at `+travel` (down) and `-travel` (up) on the vertical axis.
//! Its corner radius follows the position: square when down, fully rounded
//! when up.

use swipedeck_animation::{
    Animatable, AnimationSpec, AnimationType, Easing, Interpolation, InterpolationError,
};
use swipedeck_core::{MutableState, RuntimeHandle, State};
use swipedeck_foundation::{PointerEvent, TapDetector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedBoxConfig {
    /// Distance of each resting position from the vertical center.
    pub travel: f32,
    /// Corner radius in the upper position.
    pub max_corner_radius: f32,
    pub animation: AnimationSpec,
}

impl Default for AnimatedBoxConfig {
    fn default() -> Self {
        Self {
            travel: 300.0,
            max_corner_radius: 100.0,
            animation: AnimationSpec::tween(500, Easing::MirroredEaseIn),
        }
    }
}

pub struct AnimatedBox {
    config: AnimatedBoxConfig,
    translate_y: Animatable<f32>,
    is_up: MutableState<bool>,
    corner_radius: Interpolation,
    tap: TapDetector,
}

impl AnimatedBox {
    pub fn new(config: AnimatedBoxConfig, runtime: RuntimeHandle) -> Result<Self, InterpolationError> {
        let corner_radius = Interpolation::new(
            &[-config.travel, config.travel],
            &[config.max_corner_radius, 0.0],
        )?;
        Ok(Self {
            config,
            translate_y: Animatable::with_label(config.travel, runtime.clone(), "box.translate_y"),
            is_up: MutableState::with_runtime(false, runtime),
            corner_radius,
            tap: TapDetector::new(),
        })
    }

    /// Starts moving toward the opposite resting position.
    ///
    /// The up/down flag flips only when the box arrives; pressing again
    /// mid-flight restarts the same trip.
    pub fn press(&self) {
        let up = self.is_up.value();
        let target = if up {
            self.config.travel
        } else {
            -self.config.travel
        };
        log::debug!("box heading {}", if up { "down" } else { "up" });

        let is_up = self.is_up.clone();
        self.translate_y.animate_to_then(
            target,
            AnimationType::Tween(self.config.animation),
            move |end| {
                if end.is_finished() {
                    is_up.update(|up| *up = !*up);
                }
            },
        );
    }

    /// Feeds a pointer sample; a completed tap presses the box.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        let tapped = self.tap.handle(event);
        if tapped {
            self.press();
        }
        tapped
    }

    pub fn translate_y(&self) -> f32 {
        self.translate_y.value()
    }

    pub fn border_radius(&self) -> f32 {
        self.corner_radius.map(self.translate_y())
    }

    pub fn is_up(&self) -> bool {
        self.is_up.value()
    }

    pub fn is_animating(&self) -> bool {
        self.translate_y.is_running()
    }

    pub fn translate_y_state(&self) -> State<f32> {
        self.translate_y.state()
    }

    pub fn config(&self) -> &AnimatedBoxConfig {
        &self.config
    }
}
