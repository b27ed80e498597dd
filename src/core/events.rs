//! Core domain: events for the course flow.

use bevy::ecs::message::Message;

/// Rebuild the course from scratch. Sent by the death sequence or the reset key.
#[derive(Debug, Clone, Copy)]
pub struct SceneReloadRequested;

impl Message for SceneReloadRequested {}
