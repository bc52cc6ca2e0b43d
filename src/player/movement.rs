use avian3d::prelude::*;
use bevy::prelude::*;

use super::anim::AnimState;
use super::input::{JumpPressed, MoveInput, SprintInput};
use super::state::*;
use crate::camera::CameraYaw;
use crate::physics::GameLayer;

/// Updates grounded state via raycast
pub fn update_grounded_state(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    query: Query<(Entity, &Transform, &PlayerConfig, &PlayerVelocity, Option<&Grounded>)>,
) {
    let filter = SpatialQueryFilter::default().with_mask(GameLayer::World);

    for (entity, transform, config, velocity, was_grounded) in &query {
        // Raycast from center of capsule downward
        let ground_check_dist = config.stand_height / 2.0 + 0.1;
        let hit = spatial_query.cast_ray(
            transform.translation,
            Dir3::NEG_Y,
            ground_check_dist,
            true,
            &filter,
        );

        let is_grounded = hit.is_some() && velocity.y < 1.0;

        if is_grounded && was_grounded.is_none() {
            commands.entity(entity).insert(Grounded);
        } else if !is_grounded && was_grounded.is_some() {
            commands.entity(entity).remove::<Grounded>();
        }
    }
}

/// Updates sprint state from held input
pub fn update_sprint_state(
    mut commands: Commands,
    query: Query<(Entity, &SprintInput, Has<Grounded>), With<Player>>,
) {
    for (entity, sprint_input, grounded) in &query {
        if sprint_input.0 && grounded {
            commands.entity(entity).insert(Sprinting);
        } else {
            commands.entity(entity).remove::<Sprinting>();
        }
    }
}

/// Applies horizontal movement from input, relative to the camera yaw.
///
/// Skipped entirely while the traversal machine holds `can_move` down.
/// Also feeds the movement weight to the animation state.
pub fn apply_movement(
    mut query: Query<
        (
            &MoveInput,
            &PlayerConfig,
            &ControlFlags,
            &mut PlayerVelocity,
            &mut AnimState,
            Has<Sprinting>,
            Has<Grounded>,
        ),
        With<Player>,
    >,
    yaw_query: Query<&Transform, With<CameraYaw>>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    let Ok(yaw_transform) = yaw_query.single() else {
        return;
    };

    for (input, config, flags, mut velocity, mut anim, sprinting, grounded) in &mut query {
        if !flags.can_move {
            continue;
        }

        // Tiny input is dropped to zero so the player doesn't drift
        let input = if input.length() < config.min_input_registered {
            Vec2::ZERO
        } else {
            input.0
        };

        let forward = yaw_transform.forward().as_vec3();
        let right = yaw_transform.right().as_vec3();
        let forward = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        let right = Vec3::new(right.x, 0.0, right.z).normalize_or_zero();

        let move_dir = (forward * input.y + right * input.x).normalize_or_zero();
        let target_speed = if sprinting {
            config.sprint_speed
        } else {
            config.walk_speed
        };

        let target = move_dir * target_speed * input.length().min(1.0);
        let current = Vec3::new(velocity.x, 0.0, velocity.z);

        let accel = if !grounded {
            config.air_accel
        } else if input.length_squared() > 0.01 {
            config.ground_accel
        } else {
            config.ground_friction
        };

        let new_vel = current.move_towards(target, accel * dt);
        velocity.x = new_vel.x;
        velocity.z = new_vel.z;

        // Movement weight for the animation rig, normalized by sprint speed
        anim.target_move_speed = (input.length().min(1.0) * target_speed) / config.sprint_speed;
    }
}

/// Handles jump input when grounded
pub fn handle_jump(
    mut commands: Commands,
    mut query: Query<
        (
            Entity,
            &PlayerConfig,
            &ControlFlags,
            &mut PlayerVelocity,
            &mut JumpPressed,
            &mut AnimState,
            Has<Grounded>,
        ),
        With<Player>,
    >,
) {
    for (entity, config, flags, mut velocity, mut jump_pressed, mut anim, grounded) in &mut query {
        let pressed = std::mem::take(&mut jump_pressed.0);

        if !pressed || !flags.can_move || !grounded {
            continue;
        }

        velocity.y = config.jump_velocity;
        anim.jumping = true;
        commands.entity(entity).remove::<Grounded>();
    }
}

/// Applies gravity, with a small settling push while grounded
pub fn apply_gravity(
    mut query: Query<(&ControlFlags, &mut PlayerVelocity, &mut AnimState, Has<Grounded>)>,
    gravity: Res<Gravity>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (flags, mut velocity, mut anim, grounded) in &mut query {
        if !flags.can_use_gravity {
            continue;
        }

        if grounded && velocity.y < 0.0 {
            velocity.y = -2.0;
            anim.jumping = false;
        } else {
            velocity.y += gravity.0.y * dt;
        }
    }
}

/// Syncs PlayerVelocity to Avian's LinearVelocity
pub fn apply_velocity(
    mut query: Query<(&PlayerVelocity, &ControlFlags, &mut LinearVelocity), With<Player>>,
) {
    for (player_vel, flags, mut lin_vel) in &mut query {
        // While the traversal machine drives the transform directly, the
        // body must not fight it
        if !flags.can_move && !flags.can_use_gravity {
            lin_vel.0 = Vec3::ZERO;
            continue;
        }

        lin_vel.0 = player_vel.0;
    }
}
