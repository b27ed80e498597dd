//! Run speed with momentum: ramp-up, decay back to the plateau and blended turn-around.

use crate::content::TuningError;
use crate::movement::resources::RunTuning;

#[derive(Debug, Clone)]
pub struct HorizontalSpeedModel {
    tuning: RunTuning,
    /// Signed units per second the character is running
    current_speed: f32,
    /// Unsigned ceiling; ratchets toward `run_speed_standard`, never below `run_speed_base`
    allowed_run_speed: f32,
    /// Sign of the last direction input agreed with
    last_direction: f32,
}

impl HorizontalSpeedModel {
    pub fn new(tuning: RunTuning) -> Result<Self, TuningError> {
        if tuning.turn_around_per_sec < tuning.decay_per_sec
            || tuning.turn_around_per_sec < tuning.air_decay_per_sec
        {
            return Err(TuningError::TurnAroundSlowerThanDecay {
                turn_around: tuning.turn_around_per_sec,
                decay: tuning.decay_per_sec.max(tuning.air_decay_per_sec),
            });
        }
        if tuning.run_speed_base <= 0.0 || tuning.run_speed_standard < tuning.run_speed_base {
            return Err(TuningError::InvalidRunSpeeds {
                base: tuning.run_speed_base,
                standard: tuning.run_speed_standard,
            });
        }
        if !(0.0..=1.0).contains(&tuning.air_control) {
            return Err(TuningError::OutOfRange {
                field: "run.air_control",
                value: tuning.air_control,
            });
        }

        Ok(Self {
            allowed_run_speed: tuning.run_speed_base,
            current_speed: 0.0,
            last_direction: 1.0,
            tuning,
        })
    }

    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    #[cfg(test)]
    pub fn allowed_run_speed(&self) -> f32 {
        self.allowed_run_speed
    }

    #[cfg(test)]
    pub fn last_direction(&self) -> f32 {
        self.last_direction
    }

    pub fn tuning(&self) -> &RunTuning {
        &self.tuning
    }

    /// Turns raw lateral input (-1..=1) into a signed target speed.
    pub fn update(&mut self, raw_input: f32, grounded: bool, dt: f32) -> f32 {
        let input = raw_input.clamp(-1.0, 1.0);
        let base = self.tuning.run_speed_base;
        let standard = self.tuning.run_speed_standard;
        let air_control = if grounded { 1.0 } else { self.tuning.air_control };

        if input == 0.0 {
            if self.current_speed.abs() > base {
                let decay = if grounded {
                    self.tuning.decay_per_sec
                } else {
                    self.tuning.air_decay_per_sec
                };
                self.allowed_run_speed = (self.allowed_run_speed - decay * dt).max(base);
                self.current_speed = self.last_direction * self.allowed_run_speed;
            } else {
                self.current_speed = 0.0;
                self.allowed_run_speed = base;
            }
        } else if self.current_speed != 0.0 && input.signum() != self.current_speed.signum() {
            let blended =
                self.current_speed + input * self.tuning.turn_around_per_sec * air_control * dt;
            if blended == 0.0 || blended.signum() != self.current_speed.signum() {
                // Crossed zero: the new direction starts from the base speed
                self.allowed_run_speed = base;
                self.last_direction = input.signum();
            }
            self.current_speed = blended;
        } else {
            if self.allowed_run_speed > standard {
                self.allowed_run_speed =
                    (self.allowed_run_speed - self.tuning.decay_per_sec * dt).max(standard);
            } else if self.allowed_run_speed < standard {
                self.allowed_run_speed = (self.allowed_run_speed
                    + air_control * self.tuning.ramp_up_per_sec * dt)
                    .min(standard);
            }
            self.current_speed = input * self.allowed_run_speed;
            self.last_direction = input.signum();
        }

        self.current_speed
    }

    /// Hands externally gained velocity (a swing release) to the run model so it
    /// bleeds off through the normal decay instead of being lost.
    pub fn absorb_momentum(&mut self, horizontal_velocity: f32) {
        if horizontal_velocity == 0.0 {
            return;
        }
        self.current_speed = horizontal_velocity;
        self.allowed_run_speed = horizontal_velocity.abs().max(self.tuning.run_speed_base);
        self.last_direction = horizontal_velocity.signum();
    }
}
