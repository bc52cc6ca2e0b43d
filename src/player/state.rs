use bevy::prelude::*;

/// Marker component for the player entity (also used as input context)
#[derive(Component, Default)]
pub struct Player;

/// Player movement configuration
#[derive(Component, Clone, Copy)]
pub struct PlayerConfig {
    /// Walking speed in m/s
    pub walk_speed: f32,
    /// Sprinting speed in m/s
    pub sprint_speed: f32,
    /// Ground acceleration
    pub ground_accel: f32,
    /// Ground friction/deceleration
    pub ground_friction: f32,
    /// Air acceleration (reduced control)
    pub air_accel: f32,
    /// Jump impulse velocity
    pub jump_velocity: f32,
    /// Move input below this magnitude is treated as zero (prevents drift)
    pub min_input_registered: f32,
    /// Standing collider height
    pub stand_height: f32,
    /// Collider radius
    pub radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            walk_speed: 7.0,
            sprint_speed: 12.0,
            ground_accel: 50.0,
            ground_friction: 40.0,
            air_accel: 15.0,
            jump_velocity: 8.0,
            min_input_registered: 0.15,
            stand_height: 1.8,
            radius: 0.4,
        }
    }
}

/// Current player velocity
#[derive(Component, Default, Deref, DerefMut)]
pub struct PlayerVelocity(pub Vec3);

/// Control locks owned by the traversal machine while a traversal is
/// active; both flags are true whenever the player is in normal play.
#[derive(Component, Clone, Copy)]
pub struct ControlFlags {
    pub can_move: bool,
    pub can_use_gravity: bool,
}

impl Default for ControlFlags {
    fn default() -> Self {
        Self {
            can_move: true,
            can_use_gravity: true,
        }
    }
}

/// Marker: player is on the ground
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct Grounded;

/// Marker: player is sprinting
#[derive(Component)]
#[component(storage = "SparseSet")]
pub struct Sprinting;
