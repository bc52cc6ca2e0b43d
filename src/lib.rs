pub mod ascend;
pub mod camera;
pub mod physics;
pub mod player;
pub mod ui;

use bevy::prelude::*;

/// Adds everything the ascend ability needs: physics, the player
/// controller, the traversal state machine, and its camera and UI
/// collaborators.
pub struct BevyAscendPlugin;

impl Plugin for BevyAscendPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<physics::PhysicsPlugin>() {
            app.add_plugins(physics::PhysicsPlugin);
        }
        if !app.is_plugin_added::<player::PlayerPlugin>() {
            app.add_plugins(player::PlayerPlugin);
        }
        if !app.is_plugin_added::<ascend::AscendPlugin>() {
            app.add_plugins(ascend::AscendPlugin);
        }
        if !app.is_plugin_added::<camera::CameraPlugin>() {
            app.add_plugins(camera::CameraPlugin);
        }
        if !app.is_plugin_added::<ui::AscendUiPlugin>() {
            app.add_plugins(ui::AscendUiPlugin);
        }
    }
}

pub mod prelude {
    pub use crate::ascend::{
        AscendConfig, AscendMode, AscendPlugin, AscendTraversal, TargetingFeedback,
        TraversalEffect, TraversalPhase, TraversalRequest,
    };
    pub use crate::camera::{CameraPlugin, MainCamera, PlayerModel};
    pub use crate::physics::{GameLayer, PhysicsPlugin, SurfaceHit, SurfaceProbe};
    pub use crate::player::{
        spawn_player, AnimState, ControlFlags, Player, PlayerConfig, PlayerPlugin, PlayerVelocity,
    };
    pub use crate::ui::AscendUiPlugin;
    pub use crate::BevyAscendPlugin;
}
