//! Core domain: camera setup and the scene reload flow.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::events::SceneReloadRequested;
use crate::core::state::GameState;

/// World units to pixels.
const PIXELS_PER_UNIT: f32 = 32.0;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Projection::from(OrthographicProjection {
            scale: 1.0 / PIXELS_PER_UNIT,
            ..OrthographicProjection::default_2d()
        }),
    ));
}

/// Several requests in one frame collapse into a single reload.
pub(crate) fn handle_reload_requests(
    mut events: MessageReader<SceneReloadRequested>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    if events.read().count() > 0 {
        info!("Scene reload requested");
        game_state.set(GameState::Reloading);
    }
}

pub(crate) fn finish_reload(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Run);
}
