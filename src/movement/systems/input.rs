//! Movement domain: input sampling for locomotion.

use bevy::prelude::*;

use crate::movement::MovementInput;

/// Samples every frame. Edges are OR-latched so a press between two fixed
/// ticks still reaches the controller; `run_locomotion` clears them.
pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut input: ResMut<MovementInput>,
) {
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }
    input.lateral = x;

    input.jump_just_pressed |=
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    input.jump_held = keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK);
    input.dash_just_pressed |= keyboard.just_pressed(KeyCode::ShiftLeft)
        || keyboard.just_pressed(KeyCode::ShiftRight)
        || keyboard.just_pressed(KeyCode::KeyJ);

    // Grapple: press launches, release lets go
    input.grapple_launch |=
        keyboard.just_pressed(KeyCode::KeyL) || mouse.just_pressed(MouseButton::Left);
    input.grapple_release |=
        keyboard.just_released(KeyCode::KeyL) || mouse.just_released(MouseButton::Left);
}

#[cfg(feature = "dev-tools")]
pub(crate) fn read_reset_key(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut reload: bevy::ecs::message::MessageWriter<crate::core::SceneReloadRequested>,
) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        info!("Reset key pressed, reloading course");
        reload.write(crate::core::SceneReloadRequested);
    }
}
