//! Movement domain: placeholder presentation driven by animation signals and rope events.

use avian2d::prelude::Position;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::components::{Facing, FacingMarker, GrappleAnchor, Player};
use crate::movement::controller::PlayerLocomotionController;
use crate::movement::events::{GrappleEngagedEvent, GrappleReleasedEvent};
use crate::movement::signals::AnimationSignals;

/// Horizontal distance of the facing marker from the player's center
pub(crate) const FACING_MARKER_OFFSET: f32 = 0.2;

/// The anchor the rope is attached to, if the player is swinging.
#[derive(Resource, Debug, Default)]
pub struct RopeLine {
    pub anchor: Option<Entity>,
}

pub(crate) fn track_rope(
    mut engaged: MessageReader<GrappleEngagedEvent>,
    mut released: MessageReader<GrappleReleasedEvent>,
    mut rope: ResMut<RopeLine>,
) {
    // Release first: an engage in the same frame wins
    if released.read().count() > 0 {
        rope.anchor = None;
    }
    if let Some(event) = engaged.read().last() {
        rope.anchor = Some(event.anchor);
    }
}

/// Current position of the attached anchor. Anchors may move.
pub(crate) fn rope_end(
    rope: &RopeLine,
    anchors: &Query<&'static Position, With<GrappleAnchor>>,
) -> Option<Vec2> {
    let anchor = rope.anchor?;
    anchors.get(anchor).ok().map(|position| position.0)
}

pub(crate) fn draw_rope(
    mut gizmos: Gizmos,
    rope: Res<RopeLine>,
    anchors: Query<&'static Position, With<GrappleAnchor>>,
    player: Query<&Transform, With<Player>>,
) {
    let Some(end) = rope_end(&rope, &anchors) else {
        return;
    };
    for transform in &player {
        gizmos.line_2d(
            transform.translation.truncate(),
            end,
            Color::srgb(0.85, 0.75, 0.55),
        );
    }
}

fn signal_color(signals: &AnimationSignals) -> Color {
    if signals.is_dead {
        Color::srgb(0.35, 0.35, 0.35)
    } else if signals.hit {
        Color::srgb(1.0, 0.5, 0.5)
    } else if signals.is_dashing {
        Color::srgb(0.6, 0.9, 1.0)
    } else if signals.is_wall_sliding {
        Color::srgb(0.8, 0.7, 1.0)
    } else if signals.is_double_jumping {
        Color::srgb(1.0, 0.95, 0.6)
    } else if signals.is_jumping {
        Color::srgb(0.95, 0.95, 0.85)
    } else {
        Color::srgb(0.9, 0.9, 0.9)
    }
}

/// Stand-in for an animator: tints the player sprite by state.
pub(crate) fn tint_player(
    mut query: Query<(&AnimationSignals, &mut Sprite), (With<Player>, Changed<AnimationSignals>)>,
) {
    for (signals, mut sprite) in &mut query {
        sprite.color = signal_color(signals);
    }
}

/// Mirrors the player sprite and moves the facing marker to the leading side.
pub(crate) fn face_player(
    mut players: Query<(&PlayerLocomotionController, &mut Sprite), With<Player>>,
    mut markers: Query<(&ChildOf, &mut Transform), With<FacingMarker>>,
) {
    for (controller, mut sprite) in &mut players {
        let flip_x = controller.state().facing == Facing::Left;
        if sprite.flip_x != flip_x {
            sprite.flip_x = flip_x;
        }
    }

    for (child_of, mut transform) in &mut markers {
        let Ok((controller, _)) = players.get(child_of.parent()) else {
            continue;
        };
        let x = controller.state().facing.sign() * FACING_MARKER_OFFSET;
        if transform.translation.x != x {
            transform.translation.x = x;
        }
    }
}
