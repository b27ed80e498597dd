//! Content domain: unit tests for tuning parsing and validation.

use super::loader::parse_tuning;
use super::{TuningError, validate_tuning};
use crate::movement::MovementTuning;

#[test]
fn test_shipped_tuning_file_parses() {
    let contents = include_str!("../../assets/data/locomotion.ron");
    let tuning = parse_tuning(contents, "locomotion.ron").unwrap();
    assert_eq!(tuning.run.run_speed_standard, 20.0);
    assert_eq!(tuning.grapple.minimum_rope_length, 7.0);
    assert_eq!(tuning.probe.ground_offset.y, -0.55);
    assert_eq!(tuning.vitals.hit_points, 10.0);
}

#[test]
fn test_missing_sections_fall_back_to_defaults() {
    let tuning = parse_tuning("(dash: (speed: 30.0))", "partial.ron").unwrap();
    assert_eq!(tuning.dash.speed, 30.0);
    assert_eq!(tuning.dash.cooldown_secs, 0.5);
    assert_eq!(tuning.run.run_speed_base, 6.0);
    assert!(tuning.jump.allow_double_jump);
}

#[test]
fn test_parse_error_names_file() {
    let err = parse_tuning("(run: (run_speed_base: \"fast\"))", "broken.ron").unwrap_err();
    assert_eq!(err.file, "broken.ron");
    assert!(err.message.starts_with("Parse error"));
}

#[test]
fn test_invalid_values_rejected_on_parse() {
    let err = parse_tuning(
        "(run: (turn_around_per_sec: 5.0, decay_per_sec: 14.0))",
        "slow_turn.ron",
    )
    .unwrap_err();
    assert!(err.message.starts_with("Invalid tuning"));
    assert!(err.to_string().contains("slow_turn.ron"));
}

#[test]
fn test_default_tuning_is_valid() {
    assert_eq!(validate_tuning(&MovementTuning::default()), Ok(()));
}

#[test]
fn test_run_speed_order_validated() {
    let mut tuning = MovementTuning::default();
    tuning.run.run_speed_standard = 3.0;
    assert_eq!(
        validate_tuning(&tuning),
        Err(TuningError::InvalidRunSpeeds {
            base: 6.0,
            standard: 3.0
        })
    );
}

#[test]
fn test_grapple_height_window_validated() {
    let mut tuning = MovementTuning::default();
    tuning.grapple.max_height_to_grapple = 2.0;
    assert!(matches!(
        validate_tuning(&tuning),
        Err(TuningError::InvalidGrappleHeights { .. })
    ));
}

#[test]
fn test_non_positive_values_validated() {
    let mut tuning = MovementTuning::default();
    tuning.probe.radius = 0.0;
    assert_eq!(
        validate_tuning(&tuning),
        Err(TuningError::NotPositive {
            field: "probe.radius",
            value: 0.0
        })
    );
}

#[test]
fn test_recovery_bands_must_be_ordered() {
    let mut tuning = MovementTuning::default();
    tuning.wall.recovery.boost_distance = 3.0;
    assert!(matches!(
        validate_tuning(&tuning),
        Err(TuningError::OutOfRange { .. })
    ));
}
