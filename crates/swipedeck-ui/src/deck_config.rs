use swipedeck_animation::{Extrapolate, SpringSpec};

use crate::error::DeckConfigError;

/// Tuning for a [`crate::SwipeDeck`].
///
/// Distances are expressed as fractions of `reference_width`, usually the
/// viewport width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeDeckConfig {
    pub reference_width: f32,
    /// Release beyond this fraction of the width dismisses the card.
    pub dismiss_threshold_fraction: f32,
    /// Where a dismissed card flies to, as a fraction of the width.
    pub offscreen_distance_factor: f32,
    /// Rotation reached at the offscreen distance.
    pub max_rotation_degrees: f32,
    /// Scale of the next card while the top card rests at center.
    pub min_next_card_scale: f32,
    /// Scale of the top card while it is held.
    pub pressed_scale: f32,
    pub spring: SpringSpec,
    pub rotation_extrapolate: Extrapolate,
}

impl SwipeDeckConfig {
    pub const DEFAULT_DISMISS_THRESHOLD_FRACTION: f32 = 0.4;
    pub const DEFAULT_OFFSCREEN_DISTANCE_FACTOR: f32 = 1.2;
    pub const DEFAULT_MAX_ROTATION_DEGREES: f32 = 15.0;
    pub const DEFAULT_MIN_NEXT_CARD_SCALE: f32 = 0.7;
    pub const DEFAULT_PRESSED_SCALE: f32 = 0.95;

    pub fn new(reference_width: f32) -> Self {
        Self {
            reference_width,
            dismiss_threshold_fraction: Self::DEFAULT_DISMISS_THRESHOLD_FRACTION,
            offscreen_distance_factor: Self::DEFAULT_OFFSCREEN_DISTANCE_FACTOR,
            max_rotation_degrees: Self::DEFAULT_MAX_ROTATION_DEGREES,
            min_next_card_scale: Self::DEFAULT_MIN_NEXT_CARD_SCALE,
            pressed_scale: Self::DEFAULT_PRESSED_SCALE,
            spring: SpringSpec::default(),
            rotation_extrapolate: Extrapolate::Extend,
        }
    }

    pub fn with_dismiss_threshold_fraction(mut self, fraction: f32) -> Self {
        self.dismiss_threshold_fraction = fraction;
        self
    }

    pub fn with_offscreen_distance_factor(mut self, factor: f32) -> Self {
        self.offscreen_distance_factor = factor;
        self
    }

    pub fn with_max_rotation_degrees(mut self, degrees: f32) -> Self {
        self.max_rotation_degrees = degrees;
        self
    }

    pub fn with_min_next_card_scale(mut self, scale: f32) -> Self {
        self.min_next_card_scale = scale;
        self
    }

    pub fn with_pressed_scale(mut self, scale: f32) -> Self {
        self.pressed_scale = scale;
        self
    }

    pub fn with_spring(mut self, spring: SpringSpec) -> Self {
        self.spring = spring;
        self
    }

    pub fn with_rotation_extrapolate(mut self, extrapolate: Extrapolate) -> Self {
        self.rotation_extrapolate = extrapolate;
        self
    }

    /// Release distance beyond which a card is dismissed.
    pub fn dismiss_limit(&self) -> f32 {
        self.dismiss_threshold_fraction * self.reference_width
    }

    /// Distance a dismissed card travels from center.
    pub fn offscreen_distance(&self) -> f32 {
        self.offscreen_distance_factor * self.reference_width
    }

    pub fn validate(&self) -> Result<(), DeckConfigError> {
        let scalars = [
            ("reference_width", self.reference_width),
            ("dismiss_threshold_fraction", self.dismiss_threshold_fraction),
            ("offscreen_distance_factor", self.offscreen_distance_factor),
            ("max_rotation_degrees", self.max_rotation_degrees),
            ("min_next_card_scale", self.min_next_card_scale),
            ("pressed_scale", self.pressed_scale),
        ];
        if let Some(&(field, _)) = scalars.iter().find(|(_, value)| !value.is_finite()) {
            return Err(DeckConfigError::NonFiniteValue { field });
        }
        if self.reference_width <= 0.0 {
            return Err(DeckConfigError::NonPositiveReferenceWidth {
                value: self.reference_width,
            });
        }
        if self.dismiss_threshold_fraction <= 0.0 {
            return Err(DeckConfigError::ThresholdFractionOutOfRange {
                value: self.dismiss_threshold_fraction,
            });
        }
        if self.offscreen_distance_factor <= self.dismiss_threshold_fraction {
            return Err(DeckConfigError::OffscreenFactorTooSmall {
                factor: self.offscreen_distance_factor,
                threshold: self.dismiss_threshold_fraction,
            });
        }
        for (field, value) in [
            ("pressed_scale", self.pressed_scale),
            ("min_next_card_scale", self.min_next_card_scale),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DeckConfigError::ScaleOutOfRange { field, value });
            }
        }
        if !self.spring.is_valid() {
            return Err(DeckConfigError::InvalidSpring);
        }
        Ok(())
    }
}
