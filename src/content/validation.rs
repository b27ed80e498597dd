//! Validation of locomotion tuning before a controller is built from it.

use crate::movement::MovementTuning;

/// A tuning value that would break the controller's invariants.
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    /// Reversing must never be slower than coasting to a stop
    TurnAroundSlowerThanDecay { turn_around: f32, decay: f32 },
    InvalidRunSpeeds { base: f32, standard: f32 },
    InvalidGrappleHeights { min: f32, max: f32 },
    NotPositive { field: &'static str, value: f32 },
    OutOfRange { field: &'static str, value: f32 },
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::TurnAroundSlowerThanDecay { turn_around, decay } => write!(
                f,
                "turn-around rate {} is slower than decay rate {}",
                turn_around, decay
            ),
            TuningError::InvalidRunSpeeds { base, standard } => write!(
                f,
                "run speeds must satisfy 0 < base ({}) <= standard ({})",
                base, standard
            ),
            TuningError::InvalidGrappleHeights { min, max } => write!(
                f,
                "grapple height window [{}, {}] is empty or negative",
                min, max
            ),
            TuningError::NotPositive { field, value } => {
                write!(f, "{} must be positive, got {}", field, value)
            }
            TuningError::OutOfRange { field, value } => {
                write!(f, "{} is out of range: {}", field, value)
            }
        }
    }
}

impl std::error::Error for TuningError {}

/// Checks every value the controller relies on. The run model repeats its own
/// checks when constructed.
pub fn validate_tuning(tuning: &MovementTuning) -> Result<(), TuningError> {
    let run = &tuning.run;
    if run.turn_around_per_sec < run.decay_per_sec || run.turn_around_per_sec < run.air_decay_per_sec
    {
        return Err(TuningError::TurnAroundSlowerThanDecay {
            turn_around: run.turn_around_per_sec,
            decay: run.decay_per_sec.max(run.air_decay_per_sec),
        });
    }
    if run.run_speed_base <= 0.0 || run.run_speed_standard < run.run_speed_base {
        return Err(TuningError::InvalidRunSpeeds {
            base: run.run_speed_base,
            standard: run.run_speed_standard,
        });
    }
    if !(0.0..=1.0).contains(&run.air_control) {
        return Err(TuningError::OutOfRange {
            field: "run.air_control",
            value: run.air_control,
        });
    }

    let grapple = &tuning.grapple;
    if grapple.min_height_to_grapple < 0.0
        || grapple.max_height_to_grapple < grapple.min_height_to_grapple
    {
        return Err(TuningError::InvalidGrappleHeights {
            min: grapple.min_height_to_grapple,
            max: grapple.max_height_to_grapple,
        });
    }

    let positive = [
        ("body_mass", tuning.body_mass),
        ("probe.radius", tuning.probe.radius),
        ("dash.burst_secs", tuning.dash.burst_secs),
        ("grapple.minimum_rope_length", grapple.minimum_rope_length),
        ("vitals.hit_points", tuning.vitals.hit_points),
        (
            "wall.recovery.release_distance",
            tuning.wall.recovery.release_distance,
        ),
    ];
    for (field, value) in positive {
        if value <= 0.0 {
            return Err(TuningError::NotPositive { field, value });
        }
    }

    let bands = &tuning.wall.recovery;
    if bands.unlock_distance > bands.boost_distance || bands.boost_distance > bands.release_distance
    {
        return Err(TuningError::OutOfRange {
            field: "wall.recovery.boost_distance",
            value: bands.boost_distance,
        });
    }

    Ok(())
}
