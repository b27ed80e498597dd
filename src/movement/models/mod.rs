//! Movement domain: the locomotion sub-models driven by the controller.

mod dash;
mod grapple;
mod horizontal;
mod jump;
#[cfg(test)]
mod tests;
mod wall_slide;

pub use dash::DashModel;
pub use grapple::{GrappleModel, swing_velocity};
pub use horizontal::HorizontalSpeedModel;
pub use jump::{JumpModel, JumpOutput, JumpPhase, RecoveryStep, WallJumpRecovery};
pub use wall_slide::WallSlideModel;
