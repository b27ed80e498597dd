//! Content domain: data-driven locomotion tuning.

mod loader;
#[cfg(test)]
mod tests;
mod validation;

pub use loader::load_tuning;
pub use validation::{TuningError, validate_tuning};

use bevy::prelude::*;
use std::path::Path;

use crate::core::GameState;
use crate::movement::MovementTuning;

const TUNING_PATH: &str = "assets/data/locomotion.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .add_systems(Startup, load_content);
    }
}

/// Loads tuning once at startup, then leaves `Boot` for the run.
fn load_content(
    mut tuning: ResMut<MovementTuning>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    match load_tuning(Path::new(TUNING_PATH)) {
        Ok(loaded) => {
            info!(
                "Loaded locomotion tuning from {}: run_standard={}, dash_speed={}, min_rope={}",
                TUNING_PATH,
                loaded.run.run_speed_standard,
                loaded.dash.speed,
                loaded.grapple.minimum_rope_length
            );
            *tuning = loaded;
        }
        Err(e) => {
            warn!("{}; using default locomotion tuning", e);
            *tuning = MovementTuning::default();
        }
    }

    next_state.set(GameState::Run);
}
