use avian3d::prelude::*;
use bevy::prelude::*;

/// Downward acceleration shared by locomotion and the grounded checks.
/// Stronger than earth gravity for a snappier fall.
const GRAVITY: f32 = 20.0;

/// Sets up the Avian3D simulation the traversal probes query against
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        // 1 unit = 1 meter
        app.add_plugins(PhysicsPlugins::default().with_length_unit(1.0))
            .insert_resource(Gravity(Vec3::NEG_Y * GRAVITY));
    }
}
