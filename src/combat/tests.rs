//! Combat domain: unit tests for vitals and the death sequence.

use bevy::prelude::*;

use super::vitals::{DamageOutcome, Health, Vitals, VitalsTuning};

const TICK: f32 = 0.02;

#[test]
fn test_health_take_damage_clamps_at_zero() {
    let mut health = Health::new(10.0);
    assert_eq!(health.take_damage(4.0), 4.0);
    assert!(!health.is_dead());
    assert_eq!(health.take_damage(20.0), 6.0);
    assert_eq!(health.current, 0.0);
    assert!(health.is_dead());
}

#[test]
fn test_damage_stuns_and_grants_invincibility() {
    let mut vitals = Vitals::new(VitalsTuning::default());
    let outcome = vitals.apply_damage(3.0, Vec2::new(2.0, 0.0), Vec2::ZERO);
    assert_eq!(
        outcome,
        DamageOutcome::Stunned {
            knockback: Vec2::new(8.0, 0.0)
        }
    );
    assert_eq!(vitals.hit_points(), 7.0);
    assert!(vitals.is_stunned());
    assert!(vitals.movement_locked());

    assert_eq!(
        vitals.apply_damage(3.0, Vec2::new(2.0, 0.0), Vec2::ZERO),
        DamageOutcome::Ignored
    );
    assert_eq!(vitals.hit_points(), 7.0);
}

#[test]
fn test_stun_ends_before_invincibility() {
    let mut vitals = Vitals::new(VitalsTuning::default());
    vitals.apply_damage(1.0, Vec2::ZERO, Vec2::new(0.0, -1.0));

    // 0.3 s: stun (0.25) over, invincibility (1.0) still on
    for _ in 0..15 {
        vitals.advance(TICK);
    }
    assert!(!vitals.is_stunned());
    assert!(vitals.is_invincible());

    for _ in 0..40 {
        vitals.advance(TICK);
    }
    assert!(!vitals.is_invincible());
    assert!(matches!(
        vitals.apply_damage(1.0, Vec2::ZERO, Vec2::new(0.0, -1.0)),
        DamageOutcome::Stunned { .. }
    ));
}

#[test]
fn test_knockback_from_same_position_pushes_up() {
    let mut vitals = Vitals::new(VitalsTuning::default());
    let outcome = vitals.apply_damage(1.0, Vec2::ONE, Vec2::ONE);
    assert_eq!(
        outcome,
        DamageOutcome::Stunned {
            knockback: Vec2::new(0.0, 8.0)
        }
    );
}

#[test]
fn test_death_sequence_stops_then_reloads_once() {
    let mut vitals = Vitals::new(VitalsTuning::default());
    let outcome = vitals.apply_damage(10.0, Vec2::ZERO, Vec2::new(-1.0, 0.0));
    assert!(matches!(outcome, DamageOutcome::Died { .. }));
    assert!(vitals.is_dead());
    assert!(vitals.is_invincible());
    assert!(vitals.movement_locked());

    let mut stop_tick = None;
    let mut reload_ticks: Vec<usize> = Vec::new();
    for tick in 0..500usize {
        assert_eq!(
            vitals.apply_damage(10.0, Vec2::ZERO, Vec2::new(-1.0, 0.0)),
            DamageOutcome::Ignored
        );
        let step = vitals.advance(TICK);
        if step.stop_horizontal {
            assert!(stop_tick.is_none());
            stop_tick = Some(tick);
        }
        if step.request_reload {
            reload_ticks.push(tick);
        }
    }

    // 0.4 s then a further 1.1 s at 50 Hz
    let stop_tick = stop_tick.unwrap();
    assert!((19..=20).contains(&stop_tick));
    assert_eq!(reload_ticks.len(), 1);
    assert!((reload_ticks[0] - stop_tick).abs_diff(55) <= 1);
}

#[test]
fn test_overkill_still_dies_once() {
    let mut vitals = Vitals::new(VitalsTuning {
        hit_points: 2.0,
        ..VitalsTuning::default()
    });
    assert!(matches!(
        vitals.apply_damage(50.0, Vec2::ZERO, Vec2::X),
        DamageOutcome::Died { .. }
    ));
    assert_eq!(vitals.hit_points(), 0.0);
    assert_eq!(
        vitals.apply_damage(50.0, Vec2::ZERO, Vec2::X),
        DamageOutcome::Ignored
    );
}
