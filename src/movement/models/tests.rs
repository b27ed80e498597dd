//! Movement domain: unit tests for the locomotion sub-models.

use std::collections::HashMap;

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

use super::grapple::AnchorCandidate;
use super::wall_slide::WallProbeSide;
use super::{
    DashModel, GrappleModel, HorizontalSpeedModel, JumpModel, JumpPhase, RecoveryStep,
    WallJumpRecovery, WallSlideModel, swing_velocity,
};
use crate::content::TuningError;
use crate::movement::physics::{AnchorId, AnchorSet, BodyHandle, PhysicsWorld};
use crate::movement::resources::{
    DashTuning, GrappleTuning, JumpTuning, ProbeOffset, RunTuning, WallTuning,
};

const TICK: f32 = 0.02;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

/// Anchors only; nothing to overlap.
struct AnchorWorld {
    anchors: HashMap<AnchorId, Vec2>,
}

impl AnchorWorld {
    fn new(positions: &[Vec2]) -> (Self, AnchorSet) {
        let anchors: HashMap<_, _> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| (AnchorId(i as u32), *p))
            .collect();
        let set = AnchorSet::new((0..positions.len() as u32).map(AnchorId));
        (Self { anchors }, set)
    }
}

impl PhysicsWorld for AnchorWorld {
    fn overlap_circle(&self, _center: Vec2, _radius: f32, _mask: LayerMask) -> Vec<BodyHandle> {
        Vec::new()
    }

    fn anchor_position(&self, anchor: AnchorId) -> Option<Vec2> {
        self.anchors.get(&anchor).copied()
    }
}

// --- Horizontal speed ---

#[test]
fn test_horizontal_starts_at_rest_on_base() {
    let model = HorizontalSpeedModel::new(RunTuning::default()).unwrap();
    assert_eq!(model.current_speed(), 0.0);
    assert_eq!(model.allowed_run_speed(), 6.0);
}

#[test]
fn test_horizontal_rejects_turn_around_slower_than_decay() {
    let tuning = RunTuning {
        turn_around_per_sec: 10.0,
        decay_per_sec: 14.0,
        ..RunTuning::default()
    };
    assert!(matches!(
        HorizontalSpeedModel::new(tuning),
        Err(TuningError::TurnAroundSlowerThanDecay { .. })
    ));
}

#[test]
fn test_horizontal_ramps_toward_standard_on_ground() {
    let mut model = HorizontalSpeedModel::new(RunTuning::default()).unwrap();
    for _ in 0..10 {
        model.update(1.0, true, 0.1);
    }
    // base 6 + ramp 8/s for one second
    assert!(approx(model.current_speed(), 14.0));

    for _ in 0..200 {
        model.update(1.0, true, 0.1);
        assert!(model.allowed_run_speed() <= 20.0 + 1e-4);
    }
    assert!(approx(model.current_speed(), 20.0));
}

#[test]
fn test_horizontal_air_ramp_is_scaled_by_air_control() {
    let mut model = HorizontalSpeedModel::new(RunTuning::default()).unwrap();
    for _ in 0..10 {
        model.update(1.0, false, 0.1);
    }
    assert!(approx(model.current_speed(), 10.0));
}

#[test]
fn test_horizontal_released_input_decays_then_stops() {
    let mut model = HorizontalSpeedModel::new(RunTuning::default()).unwrap();
    for _ in 0..300 {
        model.update(1.0, true, 0.1);
    }

    let first = model.update(0.0, true, 0.1);
    assert!(approx(first, 18.6));

    let mut previous = first;
    let mut stopped = false;
    for _ in 0..50 {
        let speed = model.update(0.0, true, 0.1);
        assert!(speed <= previous);
        assert!(speed >= 0.0);
        if speed == 0.0 {
            // Collapses from exactly the base speed
            assert_eq!(previous, 6.0);
            stopped = true;
            break;
        }
        previous = speed;
    }
    assert!(stopped);
    assert_eq!(model.allowed_run_speed(), 6.0);
}

#[test]
fn test_horizontal_zero_input_from_rest_stays_at_rest() {
    let mut model = HorizontalSpeedModel::new(RunTuning::default()).unwrap();
    assert_eq!(model.update(0.0, true, TICK), 0.0);
    assert_eq!(model.update(0.0, false, TICK), 0.0);
}

#[test]
fn test_horizontal_turn_around_blends_and_resets_on_crossing() {
    let mut model = HorizontalSpeedModel::new(RunTuning::default()).unwrap();
    for _ in 0..300 {
        model.update(1.0, true, 0.1);
    }

    // 30/s turn-around: 20 -> 17 -> ... never an instant flip
    let speed = model.update(-1.0, true, 0.1);
    assert!(approx(speed, 17.0));
    assert!(approx(model.allowed_run_speed(), 20.0));

    let mut crossed = false;
    for _ in 0..10 {
        let speed = model.update(-1.0, true, 0.1);
        if speed < 0.0 {
            crossed = true;
            break;
        }
    }
    assert!(crossed);
    assert_eq!(model.allowed_run_speed(), 6.0);
    assert_eq!(model.last_direction(), -1.0);

    // Now agreeing with input: ramps from base in the new direction
    let speed = model.update(-1.0, true, 0.1);
    assert!(approx(speed, -6.8));
}

#[test]
fn test_horizontal_absorbed_momentum_decays_to_standard() {
    let mut model = HorizontalSpeedModel::new(RunTuning::default()).unwrap();
    model.absorb_momentum(30.0);
    assert_eq!(model.current_speed(), 30.0);

    let speed = model.update(1.0, true, 0.1);
    assert!(approx(speed, 28.6));
    for _ in 0..100 {
        model.update(1.0, true, 0.1);
    }
    assert!(approx(model.current_speed(), 20.0));
}

// --- Jump ---

#[test]
fn test_ground_jump_charges_with_hold_force() {
    let mut jump = JumpModel::new(JumpTuning::default());
    let out = jump.start_from_ground();
    assert_eq!(out.impulse, Vec2::new(0.0, 8.0));
    assert!(!out.zero_vertical);
    assert_eq!(jump.phase(), JumpPhase::Charging);

    let out = jump.continue_charge(true, 0.05);
    assert_eq!(out.force, Vec2::new(0.0, 20.0));
    assert!(approx(jump.held_duration(), 0.05));
}

#[test]
fn test_jump_hold_is_capped() {
    let mut jump = JumpModel::new(JumpTuning::default());
    jump.start_from_ground();
    let mut forced_ticks = 0;
    for _ in 0..40 {
        if jump.continue_charge(true, 0.05).force != Vec2::ZERO {
            forced_ticks += 1;
        }
    }
    assert_eq!(jump.phase(), JumpPhase::Completed);
    assert!((6..=7).contains(&forced_ticks));
    assert!(jump.held_duration() <= 0.3 + 0.05 + 1e-4);
}

#[test]
fn test_jump_release_completes_without_force() {
    let mut jump = JumpModel::new(JumpTuning::default());
    jump.start_from_ground();
    let out = jump.continue_charge(false, TICK);
    assert_eq!(out.force, Vec2::ZERO);
    assert_eq!(jump.phase(), JumpPhase::Completed);
}

#[test]
fn test_double_jump_once_per_airtime() {
    let mut jump = JumpModel::new(JumpTuning::default());
    jump.start_from_ground();
    assert!(jump.try_double_jump().is_none(), "not while charging");

    jump.continue_charge(false, TICK);
    let out = jump.try_double_jump().unwrap();
    assert!(out.zero_vertical);
    assert_eq!(out.impulse, Vec2::new(0.0, 8.0));
    assert!(jump.try_double_jump().is_none());

    jump.land();
    assert!(jump.double_jump_available());
    assert_eq!(jump.phase(), JumpPhase::Idle);
}

#[test]
fn test_double_jump_disabled_by_tuning() {
    let mut jump = JumpModel::new(JumpTuning {
        allow_double_jump: false,
        ..JumpTuning::default()
    });
    jump.start_from_ground();
    jump.continue_charge(false, TICK);
    assert!(!jump.can_double_jump());
    assert!(jump.try_double_jump().is_none());
}

#[test]
fn test_wall_jump_pushes_away_and_restores_double_jump() {
    let mut jump = JumpModel::new(JumpTuning::default());
    jump.start_from_ground();
    jump.continue_charge(false, TICK);
    jump.try_double_jump();

    let impulse = jump.wall_jump(-1.0, &WallTuning::default());
    assert!(approx(impulse.x, -9.6));
    assert!(approx(impulse.y, 8.0));
    assert_eq!(jump.phase(), JumpPhase::Completed);
    assert!(jump.can_double_jump());
}

// --- Wall-jump recovery ---

#[test]
fn test_recovery_bands() {
    let wall = WallTuning::default();
    let mut recovery = WallJumpRecovery::default();
    assert_eq!(recovery.step(0.0, 1.0, 0.0, &wall), RecoveryStep::Idle);

    recovery.arm(0.0);
    assert_eq!(recovery.step(0.3, 1.0, 2.0, &wall), RecoveryStep::StillLocked);
    assert_eq!(recovery.step(0.7, 1.0, 2.0, &wall), RecoveryStep::Unlock);
    assert_eq!(
        recovery.step(1.5, 1.0, 2.0, &wall),
        RecoveryStep::UnlockAndBoost
    );
    assert!(recovery.is_armed());
    assert_eq!(recovery.step(2.5, 1.0, 2.0, &wall), RecoveryStep::Release);
    assert!(!recovery.is_armed());
}

#[test]
fn test_recovery_respects_facing() {
    let wall = WallTuning::default();
    let mut recovery = WallJumpRecovery::default();
    recovery.arm(10.0);
    assert_eq!(recovery.step(9.3, -1.0, 1.0, &wall), RecoveryStep::Unlock);
}

#[test]
fn test_recovery_released_when_drifting_back_to_wall() {
    let wall = WallTuning::default();
    let mut recovery = WallJumpRecovery::default();
    recovery.arm(0.0);
    assert_eq!(recovery.step(-0.1, 1.0, 1.0, &wall), RecoveryStep::Release);
    assert!(!recovery.is_armed());
}

#[test]
fn test_recovery_disarmed_when_falling() {
    let wall = WallTuning::default();
    let mut recovery = WallJumpRecovery::default();
    recovery.arm(0.0);
    assert_eq!(recovery.step(0.2, 1.0, -1.0, &wall), RecoveryStep::Disarmed);
    assert!(!recovery.is_armed());
}

// --- Wall slide ---

#[test]
fn test_wall_slide_refused_while_grounded() {
    let mut slide = WallSlideModel::default();
    assert!(!slide.try_enter(true, &WallTuning::default()));
    assert!(!slide.is_active());
}

#[test]
fn test_wall_slide_moves_probe_behind() {
    let local = ProbeOffset { x: 0.35, y: 0.0 };
    let mut slide = WallSlideModel::default();
    assert_eq!(slide.wall_probe_offset(1.0, local), Vec2::new(0.35, 0.0));

    assert!(slide.try_enter(false, &WallTuning::default()));
    assert_eq!(slide.probe_side(), WallProbeSide::Behind);
    assert_eq!(slide.wall_probe_offset(1.0, local), Vec2::new(-0.35, 0.0));

    slide.exit();
    assert_eq!(slide.probe_side(), WallProbeSide::Front);
}

#[test]
fn test_wall_slide_hold_velocity() {
    let wall = WallTuning::default();
    let mut slide = WallSlideModel::default();
    slide.try_enter(false, &wall);
    assert_eq!(slide.hold(-1.0, &wall), Vec2::new(2.0, -5.0));
    assert!(slide.was_active_last_tick());
}

#[test]
fn test_wall_slide_entry_conditions() {
    let wall = WallTuning::default();
    let mut slide = WallSlideModel::default();
    assert!(slide.should_enter(-1.0, false));
    assert!(!slide.should_enter(1.0, false));
    assert!(slide.should_enter(1.0, true));

    slide.try_enter(false, &wall);
    slide.hold(1.0, &wall);
    assert!(!slide.should_enter(-1.0, false));
}

#[test]
fn test_wall_slide_end_is_debounced() {
    let wall = WallTuning::default();
    let mut slide = WallSlideModel::default();
    slide.try_enter(false, &wall);
    slide.request_end(&wall);
    assert!(slide.is_ending());
    assert!(!slide.advance(0.05));
    assert!(slide.advance(0.05));
}

#[test]
fn test_wall_slide_hold_cancels_pending_end() {
    let wall = WallTuning::default();
    let mut slide = WallSlideModel::default();
    slide.try_enter(false, &wall);
    slide.request_end(&wall);
    slide.hold(1.0, &wall);
    assert!(!slide.is_ending());
    assert!(!slide.advance(0.2));
}

#[test]
fn test_wall_slide_contact_loss_waits_for_recheck() {
    let wall = WallTuning::default();
    let mut slide = WallSlideModel::default();
    slide.try_enter(false, &wall);
    assert!(!slide.can_confirm_loss());
    slide.advance(0.05);
    assert!(!slide.can_confirm_loss());
    slide.advance(0.05);
    assert!(slide.can_confirm_loss());
}

// --- Dash ---

/// Ticks after the dash start until a new dash is accepted.
fn ticks_until_dash_ready(dash: &mut DashModel, already: u32) -> u32 {
    let mut ticks = already;
    while !dash.can_dash() {
        dash.advance(TICK);
        ticks += 1;
        assert!(ticks < 1000);
    }
    ticks
}

#[test]
fn test_dash_lockout_covers_burst_and_cooldown() {
    let mut dash = DashModel::new(DashTuning::default());
    assert!(dash.try_start(false));
    assert!(dash.is_active());
    assert!(!dash.try_start(false));

    // 0.1 burst + 0.5 cooldown at 50 Hz
    assert_eq!(ticks_until_dash_ready(&mut dash, 0), 30);
    assert!(!dash.is_active());
}

#[test]
fn test_dash_burst_ends_after_five_ticks() {
    let mut dash = DashModel::new(DashTuning::default());
    dash.try_start(false);
    for _ in 0..4 {
        dash.advance(TICK);
        assert!(dash.is_active());
    }
    dash.advance(TICK);
    assert!(!dash.is_active());
    assert!(approx(dash.cooldown_remaining(), 0.5));
}

#[test]
fn test_dash_refused_while_wall_sliding() {
    let mut dash = DashModel::new(DashTuning::default());
    assert!(!dash.try_start(true));
    assert!(dash.can_dash());
}

#[test]
fn test_dash_interrupt_keeps_total_lockout() {
    let mut dash = DashModel::new(DashTuning::default());
    dash.try_start(false);
    dash.advance(TICK);
    dash.advance(TICK);
    assert!(dash.interrupt());
    assert!(!dash.is_active());
    // Nothing left to cut short
    assert!(!dash.interrupt());
    assert!(approx(dash.cooldown_remaining(), 0.56));
    assert_eq!(ticks_until_dash_ready(&mut dash, 2), 30);
}

// --- Grapple ---

fn vertical_reach() -> GrappleTuning {
    GrappleTuning {
        min_height_to_grapple: 1.0,
        ..GrappleTuning::default()
    }
}

#[test]
fn test_grapple_picks_nearest_anchor() {
    let (world, anchors) = AnchorWorld::new(&[
        Vec2::new(0.0, 3.0),
        Vec2::new(0.0, 4.5),
        Vec2::new(0.0, 2.9),
    ]);
    let grapple = GrappleModel::new(vertical_reach(), anchors);
    let candidate = grapple.find_anchor(Vec2::ZERO, &world).unwrap();
    assert_eq!(candidate.anchor, AnchorId(2));
    assert!(approx(candidate.distance, 2.9));
}

#[test]
fn test_grapple_ignores_anchors_out_of_reach() {
    let (world, anchors) = AnchorWorld::new(&[
        // too far sideways
        Vec2::new(6.0, 8.0),
        // too low
        Vec2::new(0.0, 4.0),
        // too high
        Vec2::new(0.0, 16.0),
    ]);
    let grapple = GrappleModel::new(GrappleTuning::default(), anchors);
    assert!(grapple.find_anchor(Vec2::ZERO, &world).is_none());
}

#[test]
fn test_grapple_tie_keeps_first_scanned() {
    let (world, anchors) = AnchorWorld::new(&[Vec2::new(-1.0, 6.0), Vec2::new(1.0, 6.0)]);
    let grapple = GrappleModel::new(GrappleTuning::default(), anchors);
    let candidate = grapple.find_anchor(Vec2::ZERO, &world).unwrap();
    assert_eq!(candidate.anchor, AnchorId(0));
}

#[test]
fn test_grapple_skips_vanished_anchor() {
    let (world, _) = AnchorWorld::new(&[Vec2::new(0.0, 6.0)]);
    let anchors = AnchorSet::new([AnchorId(7), AnchorId(0)]);
    let grapple = GrappleModel::new(GrappleTuning::default(), anchors);
    let candidate = grapple.find_anchor(Vec2::ZERO, &world).unwrap();
    assert_eq!(candidate.anchor, AnchorId(0));
}

#[test]
fn test_grapple_rope_never_shorter_than_minimum() {
    let mut grapple = GrappleModel::new(GrappleTuning::default(), AnchorSet::default());
    let distance = grapple.engage(&AnchorCandidate {
        anchor: AnchorId(0),
        position: Vec2::new(0.0, 2.0),
        distance: 2.0,
    });
    assert_eq!(distance, 7.0);
    assert!(grapple.is_engaged());

    let distance = grapple.engage(&AnchorCandidate {
        anchor: AnchorId(1),
        position: Vec2::new(0.0, 9.0),
        distance: 9.0,
    });
    assert_eq!(distance, 9.0);
    assert_eq!(grapple.anchor(), Some(AnchorId(1)));
}

#[test]
fn test_grapple_release_scales_momentum() {
    let mut grapple = GrappleModel::new(
        GrappleTuning {
            release_multiplier: 1.5,
            ..GrappleTuning::default()
        },
        AnchorSet::default(),
    );
    assert_eq!(grapple.release(4.0), None);

    grapple.engage(&AnchorCandidate {
        anchor: AnchorId(0),
        position: Vec2::new(0.0, 8.0),
        distance: 8.0,
    });
    assert_eq!(grapple.release(4.0), Some(6.0));
    assert!(!grapple.is_engaged());
    assert_eq!(grapple.constraint_distance(), 0.0);
}

#[test]
fn test_swing_velocity_is_tangent_and_keeps_speed() {
    let to_anchor = Vec2::new(0.0, 5.0);
    let swung = swing_velocity(Vec2::new(3.0, -4.0), to_anchor);
    assert!(approx(swung.length(), 5.0));
    assert!(approx(swung.dot(to_anchor), 0.0));
    // Keeps heading the way it was already going
    assert!(swung.x > 0.0);

    let swung = swing_velocity(Vec2::new(-2.0, 0.0), to_anchor);
    assert!(approx(swung.x, -2.0));
}

#[test]
fn test_swing_velocity_at_rest_is_unchanged() {
    assert_eq!(
        swing_velocity(Vec2::ZERO, Vec2::new(0.0, 5.0)),
        Vec2::ZERO
    );
}
