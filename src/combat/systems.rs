//! Combat domain: hazard contact detection and damage application.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::Hazard;
use crate::combat::events::DamageEvent;
use crate::movement::{
    AnchorRegistry, AvianBody, MovementTuning, Player, PlayerLocomotionController, RopeJoint,
    apply_joint_requests,
};

pub(crate) fn detect_hazard_contacts(
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    hazards: Query<(&Hazard, &Transform)>,
    players: Query<(), With<Player>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (hazard_entity, target_entity) in pairs {
            let Ok((hazard, transform)) = hazards.get(hazard_entity) else {
                continue;
            };
            if players.get(target_entity).is_err() {
                continue;
            }
            damage_events.write(DamageEvent {
                amount: hazard.damage,
                source_position: transform.translation.truncate(),
            });
        }
    }
}

/// Resulting locomotion events stay queued on the controller and are
/// published by the next locomotion tick.
pub(crate) fn apply_player_damage(
    mut commands: Commands,
    mut damage_events: MessageReader<DamageEvent>,
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    registry: Res<AnchorRegistry>,
    mut players: Query<
        (
            Entity,
            &Position,
            &mut LinearVelocity,
            &mut PlayerLocomotionController,
            &mut RopeJoint,
        ),
        With<Player>,
    >,
) {
    for event in damage_events.read() {
        for (entity, position, mut velocity, mut controller, mut rope) in &mut players {
            let mut joint_requests = Vec::new();
            let mut body = AvianBody {
                handle: entity.into(),
                position: position.0,
                velocity: &mut velocity.0,
                inverse_mass: tuning.body_mass.recip(),
                dt: time.delta_secs(),
                joint_requests: &mut joint_requests,
            };
            controller.apply_damage(event.amount, event.source_position, &mut body);
            apply_joint_requests(&mut commands, entity, &joint_requests, &registry, &mut rope);
        }
    }
}
