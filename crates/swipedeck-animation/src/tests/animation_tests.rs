use super::*;

use std::cell::RefCell;
use std::rc::Rc;
use swipedeck_testing::FrameDriver;

fn record_end(log: &Rc<RefCell<Vec<AnimationEnd>>>) -> impl FnOnce(AnimationEnd) + 'static {
    let log = Rc::clone(log);
    move |end| log.borrow_mut().push(end)
}

#[test]
fn tween_interpolates_over_time() {
    let mut driver = FrameDriver::new();
    let alpha = Animatable::new(0.0f32, driver.handle());
    let state = alpha.state();

    alpha.animate_to(1.0, AnimationType::Tween(AnimationSpec::linear(100)));
    assert_eq!(state.get(), 0.0);
    assert!(alpha.is_running());

    let mut samples = Vec::new();
    while !driver.is_idle() {
        driver.advance_frame();
        samples.push(state.get());
    }

    assert!(
        samples.iter().any(|value| *value > 0.0 && *value < 1.0),
        "animation should report intermediate values: {samples:?}"
    );
    assert!(samples.windows(2).all(|pair| pair[1] >= pair[0]));
    assert_eq!(alpha.value(), 1.0);
    assert!(!alpha.is_running());
}

#[test]
fn tween_respects_delay() {
    let mut driver = FrameDriver::new();
    let value = Animatable::new(0.0f32, driver.handle());

    value.animate_to(
        10.0,
        AnimationType::Tween(AnimationSpec::linear(50).with_delay(100)),
    );
    driver.advance_millis(90);
    assert_eq!(value.value(), 0.0);

    driver.run_until_idle().expect("tween settles");
    assert_eq!(value.value(), 10.0);
}

#[test]
fn spring_settles_exactly_on_target() {
    let mut driver = FrameDriver::new();
    let offset = Animatable::new(-200.0f32, driver.handle());
    let ends = Rc::new(RefCell::new(Vec::new()));

    offset.animate_to_then(
        -480.0,
        AnimationType::Spring(SpringSpec::default()),
        record_end(&ends),
    );
    let frames = driver.run_until_idle().expect("spring settles");

    assert!(frames > 2, "spring should take several frames, took {frames}");
    assert_eq!(offset.value(), -480.0);
    assert_eq!(ends.borrow().as_slice(), &[AnimationEnd::Finished]);
}

#[test]
fn stiff_and_bouncy_springs_converge() {
    for spec in [SpringSpec::stiff(), SpringSpec::bouncy()] {
        let mut driver = FrameDriver::new();
        let scale = Animatable::new(1.0f32, driver.handle());
        scale.animate_to(0.95, AnimationType::Spring(spec));
        driver.run_until_idle().expect("spring settles");
        assert_eq!(scale.value(), 0.95, "{spec:?}");
    }
}

#[test]
fn critically_damped_spring_does_not_overshoot() {
    let mut driver = FrameDriver::new();
    let offset = Animatable::new(-100.0f32, driver.handle());
    offset.animate_to(0.0, AnimationType::Spring(SpringSpec::default()));

    while !driver.is_idle() {
        driver.advance_frame();
        assert!(offset.value() <= 0.0, "overshot to {}", offset.value());
    }
}

#[test]
fn long_fractional_travels_settle_on_target() {
    let cases = [
        (-354.733f32, -921.6f32),
        (1_000.25, 2_304.0),
        (-4_500.125, -4_608.0),
        (-12_345.678, -24_000.0),
    ];
    for (start, target) in cases {
        let mut driver = FrameDriver::new();
        let offset = Animatable::new(start, driver.handle());
        let ends = Rc::new(RefCell::new(Vec::new()));

        offset.animate_to_then(
            target,
            AnimationType::Spring(SpringSpec::default()),
            record_end(&ends),
        );
        driver
            .run_until_idle()
            .unwrap_or_else(|err| panic!("{start} -> {target}: {err}"));

        assert_eq!(offset.value(), target);
        assert_eq!(ends.borrow().as_slice(), &[AnimationEnd::Finished]);
    }
}

#[test]
fn overdamped_spring_settles() {
    let mut driver = FrameDriver::new();
    let offset = Animatable::new(-300.0f32, driver.handle());
    let spec = SpringSpec {
        damping_ratio: 10.0,
        ..SpringSpec::default()
    };

    offset.animate_to(-4_608.0, AnimationType::Spring(spec));
    driver
        .run_until_idle_within(1_000)
        .expect("overdamped spring settles");

    assert_eq!(offset.value(), -4_608.0);
}

#[test]
fn new_animation_interrupts_previous_one() {
    let mut driver = FrameDriver::new();
    let value = Animatable::new(0.0f32, driver.handle());
    let first = Rc::new(RefCell::new(Vec::new()));
    let second = Rc::new(RefCell::new(Vec::new()));

    value.animate_to_then(
        100.0,
        AnimationType::Tween(AnimationSpec::linear(200)),
        record_end(&first),
    );
    let first_generation = value.generation();
    driver.advance_frames(3);

    value.animate_to_then(
        -50.0,
        AnimationType::Spring(SpringSpec::default()),
        record_end(&second),
    );
    assert_ne!(value.generation(), first_generation);
    assert_eq!(first.borrow().as_slice(), &[AnimationEnd::Interrupted]);

    driver.run_until_idle().expect("second animation settles");
    assert_eq!(value.value(), -50.0);
    assert_eq!(first.borrow().len(), 1, "callback fires exactly once");
    assert_eq!(second.borrow().as_slice(), &[AnimationEnd::Finished]);
}

#[test]
fn snap_interrupts_and_cancels_frames() {
    let mut driver = FrameDriver::new();
    let value = Animatable::new(0.0f32, driver.handle());
    let ends = Rc::new(RefCell::new(Vec::new()));

    value.animate_to_then(
        1.0,
        AnimationType::Spring(SpringSpec::default()),
        record_end(&ends),
    );
    driver.advance_frame();
    value.snap_to(0.25);

    assert!(driver.is_idle(), "snap cancels the pending frame");
    assert_eq!(value.value(), 0.25);
    assert_eq!(value.target(), 0.25);
    assert_eq!(ends.borrow().as_slice(), &[AnimationEnd::Interrupted]);
    assert!(!value.is_running());
}

#[test]
fn completion_callback_may_restart_the_channel() {
    let mut driver = FrameDriver::new();
    let value = Animatable::new(0.0f32, driver.handle());

    {
        let chained = value.clone();
        value.animate_to_then(
            1.0,
            AnimationType::Tween(AnimationSpec::linear(32)),
            move |end| {
                if end.is_finished() {
                    chained.animate_to(2.0, AnimationType::Tween(AnimationSpec::linear(32)));
                }
            },
        );
    }
    driver.run_until_idle().expect("chain settles");

    assert_eq!(value.value(), 2.0);
}

#[test]
fn animating_to_current_value_finishes_quickly() {
    let mut driver = FrameDriver::new();
    let scale = Animatable::new(1.0f32, driver.handle());
    let ends = Rc::new(RefCell::new(Vec::new()));

    scale.animate_to_then(
        1.0,
        AnimationType::Spring(SpringSpec::default()),
        record_end(&ends),
    );
    let frames = driver.run_until_idle().expect("settles");

    assert!(frames <= 2);
    assert_eq!(ends.borrow().as_slice(), &[AnimationEnd::Finished]);
}

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::Linear.transform(0.0), 0.0);
    assert_eq!(Easing::Linear.transform(0.5), 0.5);
    assert_eq!(Easing::Linear.transform(1.0), 1.0);
}

#[test]
fn easing_bounds_are_correct() {
    let easings = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowIn,
        Easing::LinearOutSlowIn,
        Easing::FastOutLinear,
        Easing::MirroredEaseIn,
    ];

    for easing in easings {
        assert!(easing.transform(0.0).abs() < 0.01, "start of {easing:?}");
        assert!((easing.transform(1.0) - 1.0).abs() < 0.01, "end of {easing:?}");
    }
}

#[test]
fn ease_in_out_is_symmetric_at_midpoint() {
    assert!((Easing::EaseInOut.transform(0.5) - 0.5).abs() < 0.01);
    assert!(Easing::EaseInOut.transform(0.25) < 0.25);
}

#[test]
fn mirrored_ease_in_is_point_symmetric() {
    let easing = Easing::MirroredEaseIn;
    assert_eq!(easing.transform(0.5), 0.5);
    assert!((easing.transform(0.25) - Easing::EaseIn.transform(0.5) / 2.0).abs() < 1e-6);
    for fraction in [0.1f32, 0.2, 0.3, 0.4] {
        let sum = easing.transform(fraction) + easing.transform(1.0 - fraction);
        assert!((sum - 1.0).abs() < 1e-4, "{fraction}: {sum}");
    }
}

#[test]
fn animation_spec_default_has_reasonable_values() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, 300);
    assert_eq!(spec.easing, Easing::FastOutSlowIn);
    assert_eq!(spec.delay_millis, 0);
}

#[test]
fn spring_spec_presets() {
    assert_eq!(SpringSpec::default().damping_ratio, 1.0);
    assert!(SpringSpec::bouncy().damping_ratio < 1.0);
    assert!(SpringSpec::stiff().stiffness > SpringSpec::default().stiffness);
    assert!(SpringSpec::default().is_valid());
    let broken = SpringSpec {
        stiffness: 0.0,
        ..SpringSpec::default()
    };
    assert!(!broken.is_valid());
    let undamped = SpringSpec {
        damping_ratio: 0.0,
        ..SpringSpec::default()
    };
    assert!(!undamped.is_valid());
}
