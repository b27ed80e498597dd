//! Combat domain: player vitals, hazards and damage intake.

mod components;
mod events;
mod systems;
#[cfg(test)]
mod tests;
mod vitals;

pub use components::Hazard;
pub use events::{DamageEvent, PlayerDiedEvent};
pub use vitals::{DamageOutcome, Vitals, VitalsTuning};

use bevy::prelude::*;

use crate::core::GameState;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<DamageEvent>()
            .add_message::<PlayerDiedEvent>()
            .add_systems(
                Update,
                (systems::detect_hazard_contacts, systems::apply_player_damage)
                    .chain()
                    .run_if(in_state(GameState::Run)),
            );
    }
}
