//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::VitalsTuning;

/// Every number the locomotion controller reads. Loaded from
/// `assets/data/locomotion.ron`; any field left out keeps its default.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub run: RunTuning,
    pub jump: JumpTuning,
    pub wall: WallTuning,
    pub dash: DashTuning,
    pub grapple: GrappleTuning,
    pub probe: ProbeTuning,
    pub vitals: VitalsTuning,
    /// Mass used to turn impulses and forces into velocity changes.
    pub body_mass: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            run: RunTuning::default(),
            jump: JumpTuning::default(),
            wall: WallTuning::default(),
            dash: DashTuning::default(),
            grapple: GrappleTuning::default(),
            probe: ProbeTuning::default(),
            vitals: VitalsTuning::default(),
            body_mass: 1.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunTuning {
    /// The starting speed when moving from standing still
    pub run_speed_base: f32,
    /// Plateau reached by plain running. Extra speed from maneuvers bleeds back to this.
    pub run_speed_standard: f32,
    /// Units per second the allowed speed climbs while below standard
    pub ramp_up_per_sec: f32,
    /// Units per second the allowed speed falls while above standard (or with no input, grounded)
    pub decay_per_sec: f32,
    /// Decay with no input while airborne
    pub air_decay_per_sec: f32,
    /// How quickly the character can switch directions
    pub turn_around_per_sec: f32,
    /// Fraction of ramp/turn-around authority kept mid-air (0..=1)
    pub air_control: f32,
    /// Seconds to approach the target lateral velocity (0 = immediate)
    pub movement_smoothing: f32,
    pub max_fall_speed: f32,
}

impl Default for RunTuning {
    fn default() -> Self {
        Self {
            run_speed_base: 6.0,
            run_speed_standard: 20.0,
            ramp_up_per_sec: 8.0,
            decay_per_sec: 14.0,
            air_decay_per_sec: 7.0,
            turn_around_per_sec: 30.0,
            air_control: 0.5,
            movement_smoothing: 0.05,
            max_fall_speed: 25.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JumpTuning {
    /// Upward impulse applied when leaving the ground
    pub impulse: f32,
    /// Upward force applied per tick while the jump is held
    pub hold_force: f32,
    /// Holding past this many seconds completes the jump
    pub max_hold_secs: f32,
    pub double_jump_impulse: f32,
    pub allow_double_jump: bool,
}

impl Default for JumpTuning {
    fn default() -> Self {
        Self {
            impulse: 8.0,
            hold_force: 20.0,
            max_hold_secs: 0.3,
            double_jump_impulse: 8.0,
            allow_double_jump: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WallTuning {
    /// Descent speed while sliding (positive, applied downward)
    pub slide_speed: f32,
    /// Lateral velocity along facing while sliding; negative presses into the wall
    pub slide_push: f32,
    /// Seconds after entering a slide before loss of contact can end it
    pub recheck_secs: f32,
    /// Seconds the away-from-wall input must hold before the slide ends
    pub end_slide_debounce_secs: f32,
    /// Horizontal share of the wall-jump impulse relative to `JumpTuning::impulse`
    pub jump_horizontal_factor: f32,
    pub recovery: WallJumpRecoveryTuning,
}

impl Default for WallTuning {
    fn default() -> Self {
        Self {
            slide_speed: 5.0,
            slide_push: -2.0,
            recheck_secs: 0.1,
            end_slide_debounce_secs: 0.1,
            jump_horizontal_factor: 1.2,
            recovery: WallJumpRecoveryTuning::default(),
        }
    }
}

/// Distance bands gating lateral control after a wall jump.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WallJumpRecoveryTuning {
    pub unlock_distance: f32,
    pub boost_distance: f32,
    pub release_distance: f32,
    pub boost_speed: f32,
    /// Falling faster than this ends the recovery window
    pub descent_disarm_speed: f32,
}

impl Default for WallJumpRecoveryTuning {
    fn default() -> Self {
        Self {
            unlock_distance: 0.5,
            boost_distance: 1.0,
            release_distance: 2.0,
            boost_speed: 10.0,
            descent_disarm_speed: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashTuning {
    pub speed: f32,
    pub burst_secs: f32,
    pub cooldown_secs: f32,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            speed: 25.0,
            burst_secs: 0.1,
            cooldown_secs: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GrappleTuning {
    /// The maximum X distance an anchor can be from the character
    pub max_x_to_grapple: f32,
    /// The minimum Y distance between character and anchor
    pub min_height_to_grapple: f32,
    /// The maximum Y distance between character and anchor
    pub max_height_to_grapple: f32,
    /// The shortest the rope can be
    pub minimum_rope_length: f32,
    /// Scales swing velocity when it is handed back to the run model
    pub release_multiplier: f32,
    pub release_on_land: bool,
    pub release_on_wall: bool,
}

impl Default for GrappleTuning {
    fn default() -> Self {
        Self {
            max_x_to_grapple: 5.0,
            min_height_to_grapple: 5.0,
            max_height_to_grapple: 15.0,
            minimum_rope_length: 7.0,
            release_multiplier: 1.0,
            release_on_land: true,
            release_on_wall: true,
        }
    }
}

/// Overlap-circle probes, offsets are relative to the character's position.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeTuning {
    pub radius: f32,
    pub ground_offset: ProbeOffset,
    /// Offset of the wall probe in front of a right-facing character
    pub wall_offset: ProbeOffset,
}

impl Default for ProbeTuning {
    fn default() -> Self {
        Self {
            radius: 0.2,
            ground_offset: ProbeOffset { x: 0.0, y: -0.55 },
            wall_offset: ProbeOffset { x: 0.35, y: 0.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ProbeOffset {
    pub x: f32,
    pub y: f32,
}

impl ProbeOffset {
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Discrete intents for one fixed tick. Edges latch in `Update` and are
/// cleared once the fixed tick has consumed them.
#[derive(Resource, Debug, Default, Clone)]
pub struct MovementInput {
    pub lateral: f32,
    pub jump_just_pressed: bool,
    pub jump_held: bool,
    pub dash_just_pressed: bool,
    pub grapple_launch: bool,
    pub grapple_release: bool,
}

impl MovementInput {
    pub fn clear_edges(&mut self) {
        self.jump_just_pressed = false;
        self.dash_just_pressed = false;
        self.grapple_launch = false;
        self.grapple_release = false;
    }
}
