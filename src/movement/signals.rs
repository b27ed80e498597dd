//! Movement domain: fire-and-forget outputs for the animation, rope and scene layers.

use bevy::prelude::*;

use crate::movement::physics::AnchorId;

/// Named animation parameters. Written by the controller, never read back.
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AnimationSignals {
    pub is_jumping: bool,
    pub jump_up: bool,
    pub is_double_jumping: bool,
    pub is_wall_sliding: bool,
    pub is_dashing: bool,
    pub hit: bool,
    pub is_dead: bool,
    /// Magnitude of the horizontal run speed
    pub speed: f32,
}

/// Transitions observed during a tick, in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum LocomotionEvent {
    Landed,
    Fell,
    Jumped,
    DoubleJumped,
    WallSlideStarted,
    WallSlideEnded,
    WallJumped,
    DashStarted,
    GrappleEngaged {
        anchor: AnchorId,
        anchor_position: Vec2,
    },
    GrappleReleased,
    Damaged {
        amount: f32,
        hit_points: f32,
    },
    Died,
    SceneReloadRequested,
}
