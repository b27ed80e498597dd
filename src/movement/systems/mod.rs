//! Movement domain: system modules for locomotion updates.

pub(crate) mod input;
pub(crate) mod locomotion;
pub(crate) mod visuals;

#[cfg(feature = "dev-tools")]
pub(crate) use input::read_reset_key;
pub(crate) use input::read_input;
pub use locomotion::AnchorRegistry;
pub(crate) use locomotion::run_locomotion;
pub use visuals::RopeLine;
pub(crate) use visuals::{draw_rope, face_player, tint_player, track_rope};
