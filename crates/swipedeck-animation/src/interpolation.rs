//! Piecewise-linear mapping of an animated value onto a visual property.

use std::fmt;

use smallvec::SmallVec;

/// What happens to inputs outside the first or last stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolate {
    /// Keep following the outermost segment.
    #[default]
    Extend,
    /// Hold the outermost output.
    Clamp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationError {
    LengthMismatch { input: usize, output: usize },
    TooFewStops { len: usize },
    NotIncreasing { index: usize },
    NonFinite,
}

impl fmt::Display for InterpolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpolationError::LengthMismatch { input, output } => write!(
                f,
                "input range has {input} stops but output range has {output}"
            ),
            InterpolationError::TooFewStops { len } => {
                write!(f, "interpolation needs at least 2 stops, got {len}")
            }
            InterpolationError::NotIncreasing { index } => {
                write!(f, "input range must be strictly increasing (stop {index})")
            }
            InterpolationError::NonFinite => write!(f, "interpolation stops must be finite"),
        }
    }
}

impl std::error::Error for InterpolationError {}

/// A validated input range → output range mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolation {
    input: SmallVec<[f32; 4]>,
    output: SmallVec<[f32; 4]>,
    extrapolate: Extrapolate,
}

impl Interpolation {
    pub fn new(input: &[f32], output: &[f32]) -> Result<Self, InterpolationError> {
        if input.len() != output.len() {
            return Err(InterpolationError::LengthMismatch {
                input: input.len(),
                output: output.len(),
            });
        }
        if input.len() < 2 {
            return Err(InterpolationError::TooFewStops { len: input.len() });
        }
        if input.iter().chain(output).any(|stop| !stop.is_finite()) {
            return Err(InterpolationError::NonFinite);
        }
        if let Some(index) = input.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(InterpolationError::NotIncreasing { index: index + 1 });
        }
        Ok(Self {
            input: SmallVec::from_slice(input),
            output: SmallVec::from_slice(output),
            extrapolate: Extrapolate::default(),
        })
    }

    pub fn with_extrapolate(mut self, extrapolate: Extrapolate) -> Self {
        self.extrapolate = extrapolate;
        self
    }

    pub fn extrapolate(&self) -> Extrapolate {
        self.extrapolate
    }

    pub fn input_range(&self) -> &[f32] {
        &self.input
    }

    pub fn output_range(&self) -> &[f32] {
        &self.output
    }

    pub fn map(&self, value: f32) -> f32 {
        let last = self.input.len() - 1;
        if self.extrapolate == Extrapolate::Clamp {
            if value <= self.input[0] {
                return self.output[0];
            }
            if value >= self.input[last] {
                return self.output[last];
            }
        }

        // Segment whose upper stop is the first one above `value`, outermost otherwise.
        let upper = self.input[1..last]
            .iter()
            .position(|&stop| value < stop)
            .map_or(last, |offset| offset + 1);
        let lower = upper - 1;

        let span = self.input[upper] - self.input[lower];
        let fraction = (value - self.input[lower]) / span;
        self.output[lower] + (self.output[upper] - self.output[lower]) * fraction
    }
}
