use bevy::prelude::*;

use crate::ascend::TraversalEffect;

/// Animation parameters an attached rig reads every frame.
///
/// Stands in for the animator-controller plumbing: `move_speed` is the
/// damped locomotion blend weight, the flags select jump/ascend states.
#[derive(Component, Default)]
pub struct AnimState {
    /// Damped locomotion blend weight (0 = idle, 1 = full sprint)
    pub move_speed: f32,
    /// Undamped weight the damping chases
    pub target_move_speed: f32,
    pub ascending: bool,
    pub jumping: bool,
}

/// Smoothing window for the move-speed parameter, in seconds
const MOVE_SPEED_DAMP: f32 = 0.1;

/// Eases `move_speed` toward its target
pub fn damp_move_speed(mut query: Query<&mut AnimState>, time: Res<Time>) {
    let dt = time.delta_secs();

    for mut anim in &mut query {
        let blend = (dt / MOVE_SPEED_DAMP).min(1.0);
        anim.move_speed += (anim.target_move_speed - anim.move_speed) * blend;
    }
}

/// Applies the traversal machine's animation effects
pub fn apply_traversal_anim(
    mut reader: MessageReader<TraversalEffect>,
    mut query: Query<&mut AnimState>,
) {
    for effect in reader.read() {
        for mut anim in &mut query {
            match *effect {
                TraversalEffect::SetAscending(ascending) => anim.ascending = ascending,
                TraversalEffect::SetMoveSpeed(speed) => {
                    anim.move_speed = speed;
                    anim.target_move_speed = speed;
                }
                _ => {}
            }
        }
    }
}
