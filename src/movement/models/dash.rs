//! Two-phase dash: a fixed-speed burst followed by a cooldown.

use crate::movement::resources::DashTuning;
use crate::movement::timers::Countdown;

#[derive(Debug, Clone)]
pub struct DashModel {
    tuning: DashTuning,
    active: bool,
    burst: Countdown,
    cooldown: Countdown,
}

impl DashModel {
    pub fn new(tuning: DashTuning) -> Self {
        Self {
            tuning,
            active: false,
            burst: Countdown::default(),
            cooldown: Countdown::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    #[cfg(test)]
    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown.remaining()
    }

    /// Never true while the burst runs or the cooldown is pending.
    pub fn can_dash(&self) -> bool {
        !self.active && !self.burst.is_running() && !self.cooldown.is_running()
    }

    pub fn speed(&self) -> f32 {
        self.tuning.speed
    }

    pub fn advance(&mut self, dt: f32) {
        if self.burst.tick(dt) {
            self.active = false;
            self.cooldown.start(self.tuning.cooldown_secs);
        } else if !self.burst.is_running() {
            self.cooldown.tick(dt);
        }
    }

    /// Starts a burst unless one is running or the cooldown is pending.
    pub fn try_start(&mut self, wall_sliding: bool) -> bool {
        if wall_sliding || !self.can_dash() {
            return false;
        }
        self.active = true;
        self.burst.start(self.tuning.burst_secs);
        true
    }

    /// Wall contact cuts the burst short. The unused burst time joins the
    /// cooldown so the lockout from the dash start stays the same.
    /// Returns whether a burst was running.
    pub fn interrupt(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        let unused = self.burst.remaining();
        self.burst.clear();
        self.cooldown.start(self.tuning.cooldown_secs);
        self.cooldown.extend(unused);
        true
    }
}
