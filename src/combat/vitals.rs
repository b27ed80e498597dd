//! Combat domain: hit points, invincibility frames, stun and the scripted death.

use bevy::prelude::*;
use serde::Deserialize;

use crate::movement::Countdown;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VitalsTuning {
    pub hit_points: f32,
    /// Impulse pushing the character away from the damage source
    pub knockback_impulse: f32,
    pub stun_secs: f32,
    pub invincible_secs: f32,
    /// Death: seconds before horizontal motion is stopped
    pub death_stop_secs: f32,
    /// Death: further seconds before the scene reload is requested
    pub death_reload_secs: f32,
}

impl Default for VitalsTuning {
    fn default() -> Self {
        Self {
            hit_points: 10.0,
            knockback_impulse: 8.0,
            stun_secs: 0.25,
            invincible_secs: 1.0,
            death_stop_secs: 0.4,
            death_reload_secs: 1.1,
        }
    }
}

/// Health pool for the character
#[derive(Debug, Clone)]
pub struct Health {
    pub current: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    /// Invincible; nothing changed
    Ignored,
    Stunned { knockback: Vec2 },
    Died { knockback: Vec2 },
}

/// What the death sequence asks for on a given tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VitalsStep {
    pub stop_horizontal: bool,
    pub request_reload: bool,
}

#[derive(Debug, Clone, Default)]
struct DeathSequence {
    stop: Countdown,
    reload: Countdown,
}

#[derive(Debug, Clone)]
pub struct Vitals {
    tuning: VitalsTuning,
    health: Health,
    invincible: Countdown,
    stun: Countdown,
    death: Option<DeathSequence>,
}

impl Vitals {
    pub fn new(tuning: VitalsTuning) -> Self {
        Self {
            health: Health::new(tuning.hit_points),
            invincible: Countdown::default(),
            stun: Countdown::default(),
            death: None,
            tuning,
        }
    }

    pub fn hit_points(&self) -> f32 {
        self.health.current
    }

    pub fn is_dead(&self) -> bool {
        self.death.is_some()
    }

    /// Forced on for the whole death sequence.
    pub fn is_invincible(&self) -> bool {
        self.death.is_some() || self.invincible.is_running()
    }

    pub fn is_stunned(&self) -> bool {
        self.stun.is_running()
    }

    /// Movement is locked while stunned and for the whole death sequence.
    pub fn movement_locked(&self) -> bool {
        self.is_dead() || self.is_stunned()
    }

    pub fn apply_damage(&mut self, amount: f32, own_position: Vec2, source: Vec2) -> DamageOutcome {
        if self.is_invincible() {
            return DamageOutcome::Ignored;
        }
        self.health.take_damage(amount);
        let knockback =
            (own_position - source).normalize_or(Vec2::Y) * self.tuning.knockback_impulse;

        if self.health.is_dead() {
            let mut sequence = DeathSequence::default();
            sequence.stop.start(self.tuning.death_stop_secs);
            self.death = Some(sequence);
            DamageOutcome::Died { knockback }
        } else {
            self.stun.start(self.tuning.stun_secs);
            self.invincible.start(self.tuning.invincible_secs);
            DamageOutcome::Stunned { knockback }
        }
    }

    pub fn advance(&mut self, dt: f32) -> VitalsStep {
        self.stun.tick(dt);
        self.invincible.tick(dt);

        let mut step = VitalsStep::default();
        if let Some(death) = self.death.as_mut() {
            if death.stop.tick(dt) {
                step.stop_horizontal = true;
                death.reload.start(self.tuning.death_reload_secs);
            } else if death.reload.tick(dt) {
                step.request_reload = true;
            }
        }
        step
    }
}
