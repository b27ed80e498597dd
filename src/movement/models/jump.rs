//! Ground jump charging, the mid-air double jump and the wall-jump impulse.

use bevy::prelude::*;

use crate::movement::resources::{JumpTuning, WallTuning};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JumpPhase {
    #[default]
    Idle,
    /// Left the ground and the button is still held
    Charging,
    Completed,
}

/// What a jump step asks of the body this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct JumpOutput {
    /// Replace vertical velocity with zero before the impulse
    pub zero_vertical: bool,
    pub impulse: Vec2,
    pub force: Vec2,
}

#[derive(Debug, Clone)]
pub struct JumpModel {
    tuning: JumpTuning,
    phase: JumpPhase,
    held_duration: f32,
    double_jump_available: bool,
}

impl JumpModel {
    pub fn new(tuning: JumpTuning) -> Self {
        Self {
            tuning,
            phase: JumpPhase::Idle,
            held_duration: 0.0,
            double_jump_available: true,
        }
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn held_duration(&self) -> f32 {
        self.held_duration
    }

    #[cfg(test)]
    pub fn double_jump_available(&self) -> bool {
        self.double_jump_available
    }

    pub fn is_charging(&self) -> bool {
        self.phase == JumpPhase::Charging
    }

    pub fn restore_double_jump(&mut self) {
        self.double_jump_available = true;
    }

    pub fn land(&mut self) {
        self.phase = JumpPhase::Idle;
        self.held_duration = 0.0;
        self.double_jump_available = true;
    }

    pub fn start_from_ground(&mut self) -> JumpOutput {
        self.phase = JumpPhase::Charging;
        self.held_duration = 0.0;
        self.double_jump_available = true;
        JumpOutput {
            impulse: Vec2::new(0.0, self.tuning.impulse),
            ..default()
        }
    }

    /// Hold-to-extend. Releasing, or holding past the cap, completes the jump.
    pub fn continue_charge(&mut self, held: bool, dt: f32) -> JumpOutput {
        if self.phase != JumpPhase::Charging {
            return JumpOutput::default();
        }
        if !held || self.held_duration >= self.tuning.max_hold_secs {
            self.phase = JumpPhase::Completed;
            return JumpOutput::default();
        }
        self.held_duration += dt;
        JumpOutput {
            force: Vec2::new(0.0, self.tuning.hold_force),
            ..default()
        }
    }

    pub fn can_double_jump(&self) -> bool {
        self.tuning.allow_double_jump
            && self.double_jump_available
            && self.phase == JumpPhase::Completed
    }

    /// Consumes the double jump if one is available.
    pub fn try_double_jump(&mut self) -> Option<JumpOutput> {
        if !self.can_double_jump() {
            return None;
        }
        self.double_jump_available = false;
        Some(JumpOutput {
            zero_vertical: true,
            impulse: Vec2::new(0.0, self.tuning.double_jump_impulse),
            ..default()
        })
    }

    /// Diagonal push away from the wall. `facing` already points away from it.
    pub fn wall_jump(&mut self, facing: f32, wall: &WallTuning) -> Vec2 {
        self.phase = JumpPhase::Completed;
        self.held_duration = 0.0;
        self.double_jump_available = true;
        Vec2::new(
            facing * self.tuning.impulse * wall.jump_horizontal_factor,
            self.tuning.impulse,
        )
    }
}

/// Distance-limited recovery after a wall jump. Lateral control stays locked
/// until the character has travelled far enough from the jump origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WallJumpRecovery {
    armed: bool,
    start_x: f32,
}

/// Outcome of one recovery step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStep {
    Idle,
    StillLocked,
    Unlock,
    UnlockAndBoost,
    /// Recovery over; lateral velocity is zeroed
    Release,
    /// Recovery over because the character started falling
    Disarmed,
}

impl WallJumpRecovery {
    pub fn arm(&mut self, start_x: f32) {
        self.armed = true;
        self.start_x = start_x;
    }

    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn step(
        &mut self,
        x: f32,
        facing: f32,
        vertical_velocity: f32,
        tuning: &WallTuning,
    ) -> RecoveryStep {
        if !self.armed {
            return RecoveryStep::Idle;
        }
        let bands = &tuning.recovery;
        let falling = vertical_velocity < -bands.descent_disarm_speed;
        if falling {
            self.armed = false;
        }

        // Negative while moving away from the wall
        let distance = (self.start_x - x) * facing;
        if distance < -bands.unlock_distance && distance > -bands.boost_distance {
            RecoveryStep::Unlock
        } else if distance <= -bands.boost_distance && distance >= -bands.release_distance {
            RecoveryStep::UnlockAndBoost
        } else if distance < -bands.release_distance || distance > 0.0 {
            self.armed = false;
            RecoveryStep::Release
        } else if falling {
            RecoveryStep::Disarmed
        } else {
            RecoveryStep::StillLocked
        }
    }
}
