//! Anchor search, swing constraint and momentum hand-off on release.

use bevy::prelude::*;

use crate::movement::physics::{AnchorId, AnchorSet, PhysicsWorld};
use crate::movement::resources::GrappleTuning;

/// A qualifying anchor picked by the search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorCandidate {
    pub anchor: AnchorId,
    pub position: Vec2,
    pub distance: f32,
}

#[derive(Debug, Clone)]
pub struct GrappleModel {
    tuning: GrappleTuning,
    anchors: AnchorSet,
    engaged: Option<AnchorId>,
    constraint_distance: f32,
}

impl GrappleModel {
    pub fn new(tuning: GrappleTuning, anchors: AnchorSet) -> Self {
        Self {
            tuning,
            anchors,
            engaged: None,
            constraint_distance: 0.0,
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged.is_some()
    }

    #[cfg(test)]
    pub fn anchor(&self) -> Option<AnchorId> {
        self.engaged
    }

    #[cfg(test)]
    pub fn constraint_distance(&self) -> f32 {
        self.constraint_distance
    }

    pub fn tuning(&self) -> &GrappleTuning {
        &self.tuning
    }

    /// Nearest anchor inside the reach envelope. Ties keep the first one scanned.
    pub fn find_anchor(&self, from: Vec2, world: &impl PhysicsWorld) -> Option<AnchorCandidate> {
        let mut closest: Option<AnchorCandidate> = None;
        for anchor in self.anchors.iter() {
            let Some(position) = world.anchor_position(anchor) else {
                continue;
            };
            if !self.within_reach(from, position) {
                continue;
            }
            let distance = from.distance(position);
            if closest.is_none_or(|best| distance < best.distance) {
                closest = Some(AnchorCandidate {
                    anchor,
                    position,
                    distance,
                });
            }
        }
        closest
    }

    pub fn within_reach(&self, from: Vec2, anchor: Vec2) -> bool {
        let dx = (anchor.x - from.x).abs();
        let dy = (anchor.y - from.y).abs();
        dx <= self.tuning.max_x_to_grapple
            && dy >= self.tuning.min_height_to_grapple
            && dy <= self.tuning.max_height_to_grapple
    }

    /// Engages the rope. Returns the constraint distance.
    pub fn engage(&mut self, candidate: &AnchorCandidate) -> f32 {
        self.engaged = Some(candidate.anchor);
        self.constraint_distance = candidate.distance.max(self.tuning.minimum_rope_length);
        self.constraint_distance
    }

    /// Drops the rope. Returns the horizontal speed to hand back to the run model,
    /// or `None` if nothing was engaged.
    pub fn release(&mut self, horizontal_velocity: f32) -> Option<f32> {
        self.engaged.take()?;
        self.constraint_distance = 0.0;
        Some(horizontal_velocity * self.tuning.release_multiplier)
    }
}

/// Projects `velocity` onto the perpendicular of `to_anchor`, keeping its
/// magnitude and the side of the perpendicular it was already heading toward.
pub fn swing_velocity(velocity: Vec2, to_anchor: Vec2) -> Vec2 {
    let speed = velocity.length();
    if speed <= f32::EPSILON || to_anchor.length_squared() <= f32::EPSILON {
        return velocity;
    }
    let tangent = to_anchor.perp().normalize();
    // Signed angle between rope and motion decides which way the swing starts
    let side = if to_anchor.perp_dot(velocity) >= 0.0 {
        1.0
    } else {
        -1.0
    };
    tangent * side * speed
}
