use crate::*;
use swipedeck_testing::FrameDriver;

fn animated_box(driver: &FrameDriver) -> AnimatedBox {
    AnimatedBox::new(AnimatedBoxConfig::default(), driver.handle()).expect("valid box")
}

#[test]
fn starts_down_and_square() {
    let driver = FrameDriver::new();
    let animated = animated_box(&driver);

    assert_eq!(animated.translate_y(), 300.0);
    assert_eq!(animated.border_radius(), 0.0);
    assert!(!animated.is_up());
    assert!(!animated.is_animating());
}

#[test]
fn default_trip_is_half_a_second_eased_both_ways() {
    let config = AnimatedBoxConfig::default();
    assert_eq!(config.animation.duration_millis, 500);
    assert_eq!(config.animation.easing, Easing::MirroredEaseIn);
}

#[test]
fn press_moves_up_and_rounds_corners() {
    let mut driver = FrameDriver::new();
    let animated = animated_box(&driver);

    animated.press();
    assert!(animated.is_animating());

    driver.advance_millis(250);
    let midway = animated.translate_y();
    assert!(midway < 300.0 && midway > -300.0, "midway at {midway}");
    assert!(!animated.is_up(), "flag flips only on arrival");

    driver.run_until_idle().expect("tween settles");
    assert_eq!(animated.translate_y(), -300.0);
    assert_eq!(animated.border_radius(), 100.0);
    assert!(animated.is_up());
}

#[test]
fn tween_takes_its_full_duration() {
    let mut driver = FrameDriver::new();
    let animated = animated_box(&driver);

    animated.press();
    driver.advance_millis(400);
    assert!(animated.is_animating());

    driver.advance_millis(200);
    assert!(!animated.is_animating());
}

#[test]
fn second_press_returns_down() {
    let mut driver = FrameDriver::new();
    let animated = animated_box(&driver);

    animated.press();
    driver.run_until_idle().expect("tween settles");
    animated.press();
    driver.run_until_idle().expect("tween settles");

    assert_eq!(animated.translate_y(), 300.0);
    assert_eq!(animated.border_radius(), 0.0);
    assert!(!animated.is_up());
}

#[test]
fn border_radius_tracks_position() {
    let mut driver = FrameDriver::new();
    let animated = animated_box(&driver);

    animated.press();
    while !driver.is_idle() {
        driver.advance_frame();
        let expected = (300.0 - animated.translate_y()) / 600.0 * 100.0;
        assert!((animated.border_radius() - expected).abs() < 1e-3);
    }
}

#[test]
fn press_mid_flight_restarts_without_flipping() {
    let mut driver = FrameDriver::new();
    let animated = animated_box(&driver);

    animated.press();
    driver.advance_millis(200);
    animated.press();
    assert!(!animated.is_up());

    driver.run_until_idle().expect("tween settles");
    assert_eq!(animated.translate_y(), -300.0);
    assert!(animated.is_up());
}

#[test]
fn tap_presses_but_drag_does_not() {
    let mut driver = FrameDriver::new();
    let mut animated = animated_box(&driver);

    assert!(!animated.handle_pointer(&PointerEvent::down(10.0, 10.0)));
    assert!(!animated.handle_pointer(&PointerEvent::moved(60.0, 10.0)));
    assert!(!animated.handle_pointer(&PointerEvent::up(60.0, 10.0)));
    assert!(!animated.is_animating());

    assert!(!animated.handle_pointer(&PointerEvent::down(10.0, 10.0)));
    assert!(animated.handle_pointer(&PointerEvent::up(12.0, 11.0)));
    driver.run_until_idle().expect("tween settles");
    assert!(animated.is_up());
}

#[test]
fn degenerate_travel_is_rejected() {
    let driver = FrameDriver::new();
    let config = AnimatedBoxConfig {
        travel: 0.0,
        ..AnimatedBoxConfig::default()
    };

    assert!(AnimatedBox::new(config, driver.handle()).is_err());
}
