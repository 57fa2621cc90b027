//! Animated value channels.
//!
//! An [`Animatable`] drives one scalar through tween or spring animations on
//! the runtime's frame clock. Each channel runs at most one animation: starting
//! a new one, or snapping, supersedes whatever was in flight.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use swipedeck_core::{FrameCallbackRegistration, MutableState, RuntimeHandle, State};

/// Maximum integration step for spring physics, in seconds.
const MAX_SPRING_STEP_SECS: f32 = 0.004;
/// Floor on the spring's rest tolerance in progress units. Long travels
/// would otherwise need more precision than f32 progress carries.
const MIN_PROGRESS_TOLERANCE: f32 = 1e-5;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * f64::from(fraction)
    }
}

/// Trait for values that can participate in spring animations.
pub trait SpringScalar: Lerp + Clone {
    /// Convert the value to `f32` for physics calculations.
    fn to_f32(&self) -> f32;

    /// Compute the current progress between the start and target values.
    fn spring_progress(start: &Self, target: &Self, current: &Self) -> f32 {
        let start_val = start.to_f32();
        let target_val = target.to_f32();
        let current_val = current.to_f32();

        if (target_val - start_val).abs() < f32::EPSILON {
            1.0
        } else {
            (current_val - start_val) / (target_val - start_val)
        }
    }

    /// Determine whether the current value is close enough to the target to
    /// consider the spring finished.
    fn is_near_target(current: &Self, target: &Self, threshold: f32) -> bool {
        (current.to_f32() - target.to_f32()).abs() < threshold
    }
}

impl SpringScalar for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }
}

impl SpringScalar for f64 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }
}

/// Easing curves applied to tween progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material standard curve.
    FastOutSlowIn,
    LinearOutSlowIn,
    FastOutLinear,
    /// `EaseIn` over the first half, mirrored over the second.
    MirroredEaseIn,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowIn => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinear => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
            Easing::MirroredEaseIn => {
                if fraction < 0.5 {
                    Easing::EaseIn.transform(fraction * 2.0) / 2.0
                } else {
                    1.0 - Easing::EaseIn.transform((1.0 - fraction) * 2.0) / 2.0
                }
            }
        }
    }
}

/// Samples a unit cubic Bézier easing curve at `fraction`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    // Newton-Raphson for the parametric t matching x, bisection if it stalls.
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !converged {
        let mut lower = 0.0;
        let mut upper = 1.0;
        t = fraction;
        for _ in 0..16 {
            let delta = sample_curve(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                upper = t;
            } else {
                lower = t;
            }
            t = 0.5 * (lower + upper);
        }
    }

    sample_curve(ay, by, cy, t)
}

/// Tween specification: duration, easing and start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowIn)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 is critically damped, below bounces, above creeps.
    pub damping_ratio: f32,
    /// Higher values settle faster.
    pub stiffness: f32,
    /// Velocity (in progress units per second) under which the spring may rest.
    pub velocity_threshold: f32,
    /// Distance to the target, in value units, under which the spring may rest.
    pub position_threshold: f32,
}

impl SpringSpec {
    /// Critically damped spring with material default stiffness.
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }

    pub fn with_position_threshold(mut self, threshold: f32) -> Self {
        self.position_threshold = threshold.abs();
        self
    }

    /// Whether the physics can converge with these parameters.
    pub fn is_valid(&self) -> bool {
        self.stiffness.is_finite()
            && self.stiffness > 0.0
            && self.damping_ratio.is_finite()
            && self.damping_ratio > 0.0
            && self.velocity_threshold.is_finite()
            && self.velocity_threshold > 0.0
            && self.position_threshold.is_finite()
            && self.position_threshold > 0.0
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// How an animation started with [`Animatable::animate_to_then`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEnd {
    /// The channel reached the animation's target.
    Finished,
    /// Another animation or a snap took over the channel first.
    Interrupted,
}

impl AnimationEnd {
    pub fn is_finished(self) -> bool {
        self == AnimationEnd::Finished
    }
}

type EndCallback = Box<dyn FnOnce(AnimationEnd) + 'static>;

/// A single animated channel.
///
/// Clones share the same channel. The published [`State`] is updated on
/// every frame the channel moves.
pub struct Animatable<T: SpringScalar + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: SpringScalar + 'static> {
    label: &'static str,
    state: MutableState<T>,
    runtime: RuntimeHandle,
    current: T,
    /// Spring velocity in progress units per second.
    velocity: f32,
    /// Spring position between `start` (0.0) and `target` (1.0).
    progress: f32,
    start: T,
    target: T,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    last_frame_nanos: Option<u64>,
    /// Advances every time the channel is retargeted or snapped.
    generation: u64,
    running: bool,
    on_end: Option<EndCallback>,
    registration: Option<FrameCallbackRegistration>,
}

impl<T: SpringScalar + 'static> AnimatableInner<T> {
    /// Stops the in-flight animation, handing back its completion callback.
    fn supersede(&mut self) -> Option<EndCallback> {
        self.generation = self.generation.wrapping_add(1);
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        let interrupted = if self.running {
            self.on_end.take()
        } else {
            None
        };
        self.running = false;
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.velocity = 0.0;
        interrupted
    }

    fn settle(&mut self) -> Option<EndCallback> {
        self.current = self.target.clone();
        self.start = self.target.clone();
        self.start_time_nanos = None;
        self.last_frame_nanos = None;
        self.velocity = 0.0;
        self.progress = 1.0;
        self.running = false;
        self.state.set_value(self.target.clone());
        self.on_end.take()
    }
}

impl<T: SpringScalar + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        Self::with_label(initial, runtime, "animatable")
    }

    /// Creates a channel whose log lines are tagged with `label`.
    pub fn with_label(initial: T, runtime: RuntimeHandle, label: &'static str) -> Self {
        let inner = AnimatableInner {
            label,
            state: MutableState::with_runtime(initial.clone(), runtime.clone()),
            runtime,
            current: initial.clone(),
            velocity: 0.0,
            progress: 1.0,
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            last_frame_nanos: None,
            generation: 0,
            running: false,
            on_end: None,
            registration: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate to `target`, superseding any in-flight animation.
    pub fn animate_to(&self, target: T, animation: AnimationType) {
        self.start_animation(target, animation, None);
    }

    /// Animate to `target` and call `on_end` exactly once when the animation
    /// finishes or is superseded.
    pub fn animate_to_then(
        &self,
        target: T,
        animation: AnimationType,
        on_end: impl FnOnce(AnimationEnd) + 'static,
    ) {
        self.start_animation(target, animation, Some(Box::new(on_end)));
    }

    /// Jump to `value` immediately, superseding any in-flight animation.
    pub fn snap_to(&self, value: T) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.supersede();
            inner.current = value.clone();
            inner.start = value.clone();
            inner.target = value.clone();
            inner.state.set_value(value);
            interrupted
        };
        if let Some(on_end) = interrupted {
            on_end(AnimationEnd::Interrupted);
        }
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().running
    }

    /// Identifies the animation currently owning the channel.
    pub fn generation(&self) -> u64 {
        self.inner.borrow().generation
    }

    pub fn state(&self) -> State<T> {
        self.inner.borrow().state.as_state()
    }

    /// Handle for completion callbacks that must not keep the channel alive.
    pub fn downgrade(&self) -> WeakAnimatable<T> {
        WeakAnimatable {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn start_animation(&self, target: T, animation: AnimationType, on_end: Option<EndCallback>) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.supersede();
            inner.start = inner.current.clone();
            inner.target = target;
            inner.progress =
                <T as SpringScalar>::spring_progress(&inner.start, &inner.target, &inner.current);
            inner.animation_type = animation;
            inner.running = true;
            inner.on_end = on_end;
            log::trace!(
                "{}: animating to {} ({:?}), generation {}",
                inner.label,
                inner.target.to_f32(),
                animation,
                inner.generation
            );
            interrupted
        };
        Self::schedule_frame(&self.inner);
        if let Some(on_end) = interrupted {
            on_end(AnimationEnd::Interrupted);
        }
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let (runtime, generation) = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            (inner.runtime.clone(), inner.generation)
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, generation, time);
            }
        });
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, generation: u64, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut finished = None;
        {
            let mut inner = this.borrow_mut();
            if inner.generation != generation || !inner.running {
                return;
            }
            inner.registration = None;

            let animation_type = inner.animation_type;
            match animation_type {
                AnimationType::Tween(spec) => {
                    let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
                    let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
                    let delay_nanos = spec.delay_millis * 1_000_000;

                    if elapsed_nanos < delay_nanos {
                        schedule_next = true;
                    } else {
                        let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
                        let linear_progress = ((elapsed_nanos - delay_nanos) as f32
                            / duration_nanos as f32)
                            .clamp(0.0, 1.0);

                        if linear_progress >= 1.0 {
                            finished = Some(inner.settle());
                        } else {
                            let progress = spec.easing.transform(linear_progress);
                            let value = inner.start.lerp(&inner.target, progress);
                            inner.current = value.clone();
                            inner.state.set_value(value);
                            schedule_next = true;
                        }
                    }
                }
                AnimationType::Spring(spec) => {
                    // First frame only anchors the clock.
                    let Some(previous) = inner.last_frame_nanos.replace(frame_time_nanos) else {
                        drop(inner);
                        Self::schedule_frame(this);
                        return;
                    };
                    let dt = frame_time_nanos.saturating_sub(previous) as f32 / 1_000_000_000.0;

                    let stiffness = spec.stiffness;
                    let natural = stiffness.sqrt();
                    let damping = 2.0 * spec.damping_ratio * natural;
                    // Explicit damping diverges once a step exceeds 1 / (damping + natural).
                    let max_step = MAX_SPRING_STEP_SECS.min(1.0 / (damping + natural));
                    let progress_before = inner.progress;

                    // Semi-implicit Euler over progress, where the target sits at 1.0.
                    let mut simulated = 0.0f32;
                    while simulated < dt {
                        let step = max_step.min(dt - simulated);
                        let displacement = inner.progress - 1.0;
                        let force = -stiffness * displacement - damping * inner.velocity;
                        inner.velocity += force * step;
                        inner.progress = (inner.progress + inner.velocity * step).clamp(0.0, 2.0);
                        simulated += step;
                    }
                    inner.current = inner.start.lerp(&inner.target, inner.progress);

                    let at_rest = inner.velocity.abs() < spec.velocity_threshold;
                    let near_target = <T as SpringScalar>::is_near_target(
                        &inner.current,
                        &inner.target,
                        spec.position_threshold,
                    ) || {
                        let travel = (inner.target.to_f32() - inner.start.to_f32()).abs();
                        let tolerance =
                            (spec.position_threshold / travel).max(MIN_PROGRESS_TOLERANCE);
                        (1.0 - inner.progress).abs() < tolerance
                    };

                    // At rest and too slow to move f32 progress: nothing left to animate.
                    let stalled = inner.progress == progress_before;

                    if at_rest && (near_target || stalled) {
                        finished = Some(inner.settle());
                    } else {
                        let value = inner.current.clone();
                        inner.state.set_value(value);
                        schedule_next = true;
                    }
                }
            }

            if finished.is_some() {
                log::trace!(
                    "{}: settled at {} (generation {})",
                    inner.label,
                    inner.target.to_f32(),
                    inner.generation
                );
            }
        }

        if schedule_next {
            Self::schedule_frame(this);
        }
        if let Some(Some(on_end)) = finished {
            on_end(AnimationEnd::Finished);
        }
    }
}

pub struct WeakAnimatable<T: SpringScalar + 'static> {
    inner: Weak<RefCell<AnimatableInner<T>>>,
}

impl<T: SpringScalar + 'static> WeakAnimatable<T> {
    pub fn upgrade(&self) -> Option<Animatable<T>> {
        self.inner.upgrade().map(|inner| Animatable { inner })
    }
}

impl<T: SpringScalar + 'static> Clone for WeakAnimatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: SpringScalar + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: SpringScalar + fmt::Debug + 'static> fmt::Debug for Animatable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Animatable")
            .field("label", &inner.label)
            .field("current", &inner.current)
            .field("target", &inner.target)
            .field("running", &inner.running)
            .field("generation", &inner.generation)
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
