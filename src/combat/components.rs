//! Combat domain: damage sources placed in the course.

use bevy::prelude::*;

/// Sensor volume that damages the player on contact
#[derive(Component, Debug, Clone, Copy)]
pub struct Hazard {
    pub damage: f32,
}
