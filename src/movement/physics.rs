//! Movement domain: the narrow contract the controller drives the physics engine through.

use avian2d::prelude::LayerMask;
use bevy::prelude::*;

/// Opaque identity of a rigid body as reported by collision probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u64);

impl From<Entity> for BodyHandle {
    fn from(entity: Entity) -> Self {
        Self(entity.to_bits())
    }
}

/// Index of an anchor inside the `AnchorSet` the controller was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(pub u32);

/// Immutable list of grapple targets, populated once when the course is built.
#[derive(Debug, Clone, Default)]
pub struct AnchorSet {
    anchors: Vec<AnchorId>,
}

impl AnchorSet {
    pub fn new(anchors: impl IntoIterator<Item = AnchorId>) -> Self {
        Self {
            anchors: anchors.into_iter().collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = AnchorId> + '_ {
        self.anchors.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }
}

/// The character's own rigid body. Exclusively owned by the controller.
pub trait PhysicsBody {
    fn handle(&self) -> BodyHandle;
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    fn set_velocity(&mut self, velocity: Vec2);
    /// Instantaneous change of momentum.
    fn apply_impulse(&mut self, impulse: Vec2);
    /// Force acting over the current tick.
    fn apply_force(&mut self, force: Vec2);
    fn enable_distance_constraint(&mut self, anchor: AnchorId, distance: f32);
    fn disable_distance_constraint(&mut self);
}

/// Read-only view of the rest of the simulation.
pub trait PhysicsWorld {
    /// Bodies whose colliders overlap the circle on the given layers.
    fn overlap_circle(&self, center: Vec2, radius: f32, mask: LayerMask) -> Vec<BodyHandle>;
    /// Current position of an anchor, `None` if it no longer exists.
    fn anchor_position(&self, anchor: AnchorId) -> Option<Vec2>;
}
