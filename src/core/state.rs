//! Core domain: game state definitions for the course flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    /// Tuning is loaded here
    #[default]
    Boot,
    Run,
    /// One frame between tearing the course down and rebuilding it
    Reloading,
}
