//! Core domain: game state flow, camera and scene reload.

mod events;
mod state;
mod systems;

pub use events::SceneReloadRequested;
pub use state::GameState;

use bevy::prelude::*;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_message::<SceneReloadRequested>()
            .add_systems(Startup, systems::setup_camera)
            .add_systems(
                Update,
                systems::handle_reload_requests.run_if(in_state(GameState::Run)),
            )
            .add_systems(OnEnter(GameState::Reloading), systems::finish_reload);
    }
}
