mod look;
mod plugin;
mod traversal;

pub use look::{apply_mouse_look, CameraConfig, CameraPitch, CameraYaw, PitchAngle};
pub use plugin::CameraPlugin;
pub use traversal::{
    AscendBackdrop, CameraMode, DescendBackdrop, MainCamera, PassThroughVeil, PlayerModel,
};
