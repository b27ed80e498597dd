//! Movement domain: locomotion transitions published to the rest of the game.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Player touched ground after being airborne
#[derive(Debug, Clone, Copy)]
pub struct LandedEvent;

impl Message for LandedEvent {}

/// Player left the ground without jumping or by jumping
#[derive(Debug, Clone, Copy)]
pub struct FellEvent;

impl Message for FellEvent {}

/// Rope attached to `anchor`, which sat at `anchor_position` when it engaged
#[derive(Debug, Clone, Copy)]
pub struct GrappleEngagedEvent {
    pub anchor: Entity,
    pub anchor_position: Vec2,
}

impl Message for GrappleEngagedEvent {}

#[derive(Debug, Clone, Copy)]
pub struct GrappleReleasedEvent;

impl Message for GrappleReleasedEvent {}
