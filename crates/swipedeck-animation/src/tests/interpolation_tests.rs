use crate::{Extrapolate, Interpolation, InterpolationError};

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn two_stop_mapping_is_linear() {
    let rotation = Interpolation::new(&[-480.0, 480.0], &[-15.0, 15.0]).expect("valid ranges");

    assert_close(rotation.map(0.0), 0.0);
    assert_close(rotation.map(240.0), 7.5);
    assert_close(rotation.map(-480.0), -15.0);
}

#[test]
fn extend_continues_outer_segments() {
    let rotation = Interpolation::new(&[-480.0, 480.0], &[-15.0, 15.0]).expect("valid ranges");

    assert_close(rotation.map(960.0), 30.0);
    assert_close(rotation.map(-960.0), -30.0);
}

#[test]
fn clamp_holds_outer_outputs() {
    let scale = Interpolation::new(&[-480.0, 0.0, 480.0], &[1.0, 0.7, 1.0])
        .expect("valid ranges")
        .with_extrapolate(Extrapolate::Clamp);

    assert_close(scale.map(0.0), 0.7);
    assert_close(scale.map(240.0), 0.85);
    assert_close(scale.map(-240.0), 0.85);
    assert_close(scale.map(10_000.0), 1.0);
    assert_close(scale.map(-10_000.0), 1.0);
}

#[test]
fn descending_outputs_are_allowed() {
    let radius = Interpolation::new(&[-300.0, 300.0], &[100.0, 0.0]).expect("valid ranges");

    assert_close(radius.map(300.0), 0.0);
    assert_close(radius.map(-300.0), 100.0);
    assert_close(radius.map(0.0), 50.0);
}

#[test]
fn invalid_ranges_are_rejected() {
    assert_eq!(
        Interpolation::new(&[0.0, 1.0], &[0.0]),
        Err(InterpolationError::LengthMismatch {
            input: 2,
            output: 1
        })
    );
    assert_eq!(
        Interpolation::new(&[0.0], &[0.0]),
        Err(InterpolationError::TooFewStops { len: 1 })
    );
    assert_eq!(
        Interpolation::new(&[0.0, 0.0], &[0.0, 1.0]),
        Err(InterpolationError::NotIncreasing { index: 1 })
    );
    assert_eq!(
        Interpolation::new(&[0.0, f32::NAN], &[0.0, 1.0]),
        Err(InterpolationError::NonFinite)
    );
}
