//! Movement domain: player locomotion, the physics contract it runs against, and its Bevy wiring.

mod bootstrap;
mod components;
mod controller;
mod events;
pub mod models;
mod physics;
mod resources;
mod signals;
mod systems;
mod timers;

pub use components::{Player, RopeJoint};
pub use controller::PlayerLocomotionController;
pub use events::{FellEvent, GrappleEngagedEvent, GrappleReleasedEvent, LandedEvent};
pub use resources::{MovementInput, MovementTuning};
pub use systems::{AnchorRegistry, RopeLine};
pub(crate) use systems::locomotion::{AvianBody, apply_joint_requests};
pub use timers::Countdown;

use bevy::prelude::*;

use crate::core::GameState;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementInput>()
            .init_resource::<AnchorRegistry>()
            .init_resource::<RopeLine>()
            .add_message::<LandedEvent>()
            .add_message::<FellEvent>()
            .add_message::<GrappleEngagedEvent>()
            .add_message::<GrappleReleasedEvent>()
            .add_systems(OnEnter(GameState::Run), bootstrap::spawn_course)
            .add_systems(OnEnter(GameState::Reloading), bootstrap::despawn_course)
            .add_systems(
                Update,
                (
                    systems::read_input,
                    systems::track_rope,
                    systems::draw_rope,
                    systems::tint_player,
                    systems::face_player,
                )
                    .chain()
                    .run_if(in_state(GameState::Run)),
            )
            .add_systems(
                FixedUpdate,
                systems::run_locomotion.run_if(in_state(GameState::Run)),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(
            Update,
            systems::read_reset_key.run_if(in_state(GameState::Run)),
        );
    }
}
