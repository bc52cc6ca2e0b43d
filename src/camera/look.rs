use bevy::prelude::*;

use crate::player::{LookInput, Player};

/// Yaw pivot of the camera rig; rotates about Y and tracks the player
#[derive(Component)]
pub struct CameraYaw;

/// Pitch pivot, child of the yaw entity
#[derive(Component)]
pub struct CameraPitch;

/// Look tuning, attached to the pitch pivot
#[derive(Component, Clone)]
pub struct CameraConfig {
    pub sensitivity: f32,
    /// Upper pitch limit; generous so ceilings directly overhead stay in view
    pub max_pitch: f32,
    pub min_pitch: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.003,
            max_pitch: 89.0_f32.to_radians(),
            min_pitch: -75.0_f32.to_radians(),
        }
    }
}

/// Accumulated pitch in radians
#[derive(Component, Default, Deref, DerefMut)]
pub struct PitchAngle(pub f32);

/// Turns the mouse delta into yaw and clamped pitch rotation
pub fn apply_mouse_look(
    player_query: Query<&LookInput, With<Player>>,
    mut pitch_query: Query<
        (&mut Transform, &mut PitchAngle, &CameraConfig),
        (With<CameraPitch>, Without<CameraYaw>),
    >,
    mut yaw_query: Query<&mut Transform, With<CameraYaw>>,
) {
    let Ok(look) = player_query.single() else {
        return;
    };
    let Ok((mut pitch_transform, mut pitch, config)) = pitch_query.single_mut() else {
        return;
    };

    if let Ok(mut yaw_transform) = yaw_query.single_mut() {
        yaw_transform.rotate_y(-look.x * config.sensitivity);
    }

    pitch.0 = (pitch.0 - look.y * config.sensitivity).clamp(config.min_pitch, config.max_pitch);
    pitch_transform.rotation = Quat::from_rotation_x(pitch.0);
}

/// Parks the rig on the player, including while the traversal machine
/// drives the transform directly
pub fn sync_camera_to_player(
    player_query: Query<&Transform, With<Player>>,
    mut yaw_query: Query<&mut Transform, (With<CameraYaw>, Without<Player>)>,
) {
    let (Ok(player_transform), Ok(mut yaw_transform)) =
        (player_query.single(), yaw_query.single_mut())
    else {
        return;
    };

    yaw_transform.translation = player_transform.translation;
}
