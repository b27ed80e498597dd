//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall surfaces
    Wall,
    /// Player character
    Player,
    /// Grapple anchors - never block movement
    Anchor,
    /// Damage volumes (sensors)
    Hazard,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Small block on the player's leading side, child of the player
#[derive(Component, Debug)]
pub struct FacingMarker;

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;

/// A body the player can grapple to. Read-only to the controller.
#[derive(Component, Debug)]
pub struct GrappleAnchor;

/// The distance joint currently holding the player to an anchor, if any.
#[derive(Component, Debug, Default)]
pub struct RopeJoint(pub Option<Entity>);

/// Everything spawned for the current course; despawned on scene reload.
#[derive(Component, Debug)]
pub struct CourseEntity;
