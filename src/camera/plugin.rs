use bevy::prelude::*;

use super::look::{apply_mouse_look, sync_camera_to_player};
use super::traversal::{
    apply_camera_effects, follow_player_dressing, setup_traversal_dressing, update_camera_fov,
};

/// Plugin for the look rig and the traversal camera collaborator
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_traversal_dressing);

        app.add_systems(
            Update,
            (
                sync_camera_to_player,
                apply_mouse_look,
                apply_camera_effects,
                follow_player_dressing,
                update_camera_fov,
            )
                .chain(),
        );
    }
}
