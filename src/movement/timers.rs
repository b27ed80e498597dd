//! Movement domain: tick-driven countdowns for timed sub-states.

/// Remaining time below this counts as expired, so accumulated float error
/// never costs an extra tick.
const EXPIRY_EPSILON: f32 = 1e-4;

/// A countdown advanced once per fixed tick. Never scheduled, never suspended.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn start(&mut self, secs: f32) {
        self.remaining = secs.max(0.0);
    }

    pub fn extend(&mut self, secs: f32) {
        self.remaining = (self.remaining + secs).max(0.0);
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.remaining > EXPIRY_EPSILON
    }

    pub fn remaining(&self) -> f32 {
        if self.is_running() { self.remaining } else { 0.0 }
    }

    /// Advances by `dt`; returns true on the tick the countdown runs out.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.is_running() {
            return false;
        }
        self.remaining -= dt;
        if self.is_running() {
            false
        } else {
            self.remaining = 0.0;
            true
        }
    }
}
