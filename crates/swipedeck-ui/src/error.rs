use std::fmt;

use swipedeck_animation::InterpolationError;

/// Rejected [`crate::SwipeDeckConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum DeckConfigError {
    NonFiniteValue { field: &'static str },
    NonPositiveReferenceWidth { value: f32 },
    ThresholdFractionOutOfRange { value: f32 },
    OffscreenFactorTooSmall { factor: f32, threshold: f32 },
    ScaleOutOfRange { field: &'static str, value: f32 },
    InvalidSpring,
    Interpolation(InterpolationError),
}

impl fmt::Display for DeckConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckConfigError::NonFiniteValue { field } => write!(f, "{field} must be finite"),
            DeckConfigError::NonPositiveReferenceWidth { value } => {
                write!(f, "reference width must be positive, got {value}")
            }
            DeckConfigError::ThresholdFractionOutOfRange { value } => {
                write!(f, "dismiss threshold fraction must be positive, got {value}")
            }
            DeckConfigError::OffscreenFactorTooSmall { factor, threshold } => write!(
                f,
                "offscreen distance factor {factor} must exceed the dismiss threshold {threshold}"
            ),
            DeckConfigError::ScaleOutOfRange { field, value } => {
                write!(f, "{field} must lie in [0, 1], got {value}")
            }
            DeckConfigError::InvalidSpring => {
                write!(f, "spring needs positive stiffness and thresholds")
            }
            DeckConfigError::Interpolation(err) => write!(f, "invalid visual mapping: {err}"),
        }
    }
}

impl std::error::Error for DeckConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeckConfigError::Interpolation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InterpolationError> for DeckConfigError {
    fn from(err: InterpolationError) -> Self {
        DeckConfigError::Interpolation(err)
    }
}
