//! Movement domain: test course and player bootstrap.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::Hazard;
use crate::movement::components::{
    CourseEntity, FacingMarker, GameLayer, GrappleAnchor, Ground, Player, RopeJoint, Wall,
};
use crate::movement::controller::PlayerLocomotionController;
use crate::movement::resources::{MovementInput, MovementTuning};
use crate::movement::signals::AnimationSignals;
use crate::movement::systems::visuals::FACING_MARKER_OFFSET;
use crate::movement::systems::{AnchorRegistry, RopeLine};

const PLAYER_SIZE: Vec2 = Vec2::new(0.6, 1.0);
const PLAYER_SPAWN: Vec2 = Vec2::new(-16.0, -7.0);

fn spawn_block(commands: &mut Commands, center: Vec2, size: Vec2, color: Color) -> Entity {
    commands
        .spawn((
            CourseEntity,
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(center.x, center.y, 0.0),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
        ))
        .id()
}

/// Builds the course geometry and anchors, then the player bound to those anchors.
/// Runs on entering `GameState::Run`, so a reload rebuilds everything.
pub(crate) fn spawn_course(
    mut commands: Commands,
    tuning: Res<MovementTuning>,
    mut registry: ResMut<AnchorRegistry>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping course spawn");
        return;
    }

    let ground_color = Color::srgb(0.35, 0.4, 0.35);
    let wall_color = Color::srgb(0.25, 0.25, 0.35);
    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player]);

    // Floor and floating platforms
    for (center, size) in [
        (Vec2::new(0.0, -9.0), Vec2::new(44.0, 1.0)),
        (Vec2::new(-10.0, -3.0), Vec2::new(6.0, 0.5)),
        (Vec2::new(16.0, -2.0), Vec2::new(5.0, 0.5)),
    ] {
        let block = spawn_block(&mut commands, center, size, ground_color);
        commands.entity(block).insert((Ground, ground_layers));
    }

    // Boundary walls and a pillar to practice wall jumps on
    for (center, size) in [
        (Vec2::new(-21.5, 0.0), Vec2::new(1.0, 20.0)),
        (Vec2::new(21.5, 0.0), Vec2::new(1.0, 20.0)),
        (Vec2::new(10.0, -3.0), Vec2::new(1.0, 10.0)),
    ] {
        let block = spawn_block(&mut commands, center, size, wall_color);
        commands.entity(block).insert((Wall, wall_layers));
    }

    registry.clear();
    for center in [
        Vec2::new(-14.0, 4.0),
        Vec2::new(-4.0, 1.0),
        Vec2::new(4.0, 3.0),
    ] {
        let anchor = commands
            .spawn((
                CourseEntity,
                GrappleAnchor,
                Sprite {
                    color: Color::srgb(0.9, 0.75, 0.3),
                    custom_size: Some(Vec2::splat(0.4)),
                    ..default()
                },
                Transform::from_xyz(center.x, center.y, 0.0),
                RigidBody::Static,
                Position(center),
                Collider::circle(0.2),
                CollisionLayers::new(GameLayer::Anchor, LayerMask::NONE),
            ))
            .id();
        registry.register(anchor);
    }

    // Spikes
    commands.spawn((
        CourseEntity,
        Hazard { damage: 3.0 },
        Sprite {
            color: Color::srgb(0.8, 0.2, 0.2),
            custom_size: Some(Vec2::new(3.0, 0.5)),
            ..default()
        },
        Transform::from_xyz(15.0, -8.25, 0.0),
        RigidBody::Static,
        Collider::rectangle(3.0, 0.5),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Hazard, [GameLayer::Player]),
    ));

    let controller = match PlayerLocomotionController::new(&tuning, registry.anchor_set()) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Cannot spawn player, locomotion tuning rejected: {}", e);
            return;
        }
    };

    info!(
        "Spawning player at ({}, {}) with {} grapple anchors",
        PLAYER_SPAWN.x,
        PLAYER_SPAWN.y,
        registry.anchor_set().len()
    );

    let mut player = commands.spawn((
        // Identity & Locomotion
        (
            Player,
            CourseEntity,
            controller,
            RopeJoint::default(),
            AnimationSignals::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_xyz(PLAYER_SPAWN.x, PLAYER_SPAWN.y, 1.0),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            Mass(tuning.body_mass),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Hazard],
            ),
        ),
    ));
    player.with_children(|parent| {
        parent.spawn((
            FacingMarker,
            Sprite {
                color: Color::srgb(0.2, 0.2, 0.25),
                custom_size: Some(Vec2::splat(0.15)),
                ..default()
            },
            Transform::from_xyz(FACING_MARKER_OFFSET, 0.25, 0.1),
        ));
    });
}

/// Tears the whole course down, player and rope included.
pub(crate) fn despawn_course(
    mut commands: Commands,
    course: Query<Entity, With<CourseEntity>>,
    mut registry: ResMut<AnchorRegistry>,
    mut rope_line: ResMut<RopeLine>,
    mut input: ResMut<MovementInput>,
) {
    let count = course.iter().count();
    for entity in &course {
        commands.entity(entity).despawn();
    }
    registry.clear();
    rope_line.anchor = None;
    *input = MovementInput::default();
    info!("Course despawned: {} entities", count);
}
