//! Combat domain: damage in, death out.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Damage dealt to the player from a world-space source
#[derive(Debug, Clone, Copy)]
pub struct DamageEvent {
    pub amount: f32,
    pub source_position: Vec2,
}

impl Message for DamageEvent {}

#[derive(Debug, Clone, Copy)]
pub struct PlayerDiedEvent;

impl Message for PlayerDiedEvent {}
