//! Sustained wall contact while airborne: clamped descent, facing flip and debounced exit.

use bevy::prelude::*;

use crate::movement::resources::{ProbeOffset, WallTuning};
use crate::movement::timers::Countdown;

/// Which side of the character the wall probe sits on, relative to facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallProbeSide {
    #[default]
    Front,
    /// While sliding the character faces away from the wall it is touching
    Behind,
}

#[derive(Debug, Clone, Default)]
pub struct WallSlideModel {
    active: bool,
    was_active_last_tick: bool,
    probe_side: WallProbeSide,
    recheck_cooldown: Countdown,
    end_slide_debounce: Countdown,
}

impl WallSlideModel {
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[cfg(test)]
    pub fn was_active_last_tick(&self) -> bool {
        self.was_active_last_tick
    }

    #[cfg(test)]
    pub fn probe_side(&self) -> WallProbeSide {
        self.probe_side
    }

    #[cfg(test)]
    pub fn is_ending(&self) -> bool {
        self.end_slide_debounce.is_running()
    }

    /// World-space offset of the wall probe for the current facing.
    pub fn wall_probe_offset(&self, facing: f32, local: ProbeOffset) -> Vec2 {
        let side = match self.probe_side {
            WallProbeSide::Front => facing,
            WallProbeSide::Behind => -facing,
        };
        Vec2::new(side * local.x.abs(), local.y)
    }

    /// Advances the re-check and end-slide timers. Returns true when the
    /// debounced away-input has held long enough to end the slide.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.recheck_cooldown.tick(dt);
        self.end_slide_debounce.tick(dt) && self.active
    }

    pub fn should_enter(&self, vertical_velocity: f32, dashing: bool) -> bool {
        (!self.was_active_last_tick && vertical_velocity < 0.0) || dashing
    }

    /// Starts a slide. Refused while grounded.
    pub fn try_enter(&mut self, grounded: bool, tuning: &WallTuning) -> bool {
        if grounded {
            return false;
        }
        self.active = true;
        self.probe_side = WallProbeSide::Behind;
        self.end_slide_debounce.clear();
        self.recheck_cooldown.start(tuning.recheck_secs);
        true
    }

    pub fn exit(&mut self) {
        self.active = false;
        self.was_active_last_tick = false;
        self.probe_side = WallProbeSide::Front;
        self.end_slide_debounce.clear();
    }

    /// Lateral input pushing away from the wall starts the debounce instead of
    /// ending the slide on a single noisy tick.
    pub fn request_end(&mut self, tuning: &WallTuning) {
        if !self.end_slide_debounce.is_running() {
            self.end_slide_debounce.start(tuning.end_slide_debounce_secs);
        }
    }

    /// Velocity held while sliding. Marks this tick as slid.
    pub fn hold(&mut self, facing: f32, tuning: &WallTuning) -> Vec2 {
        self.end_slide_debounce.clear();
        self.was_active_last_tick = true;
        Vec2::new(facing * tuning.slide_push, -tuning.slide_speed)
    }

    /// Loss of contact only counts once the re-check timer has elapsed.
    pub fn can_confirm_loss(&self) -> bool {
        self.active && !self.recheck_cooldown.is_running()
    }
}
