use avian3d::prelude::*;
use bevy::prelude::*;

use super::machine::{
    apply_control_effect, AscendTraversal, TraversalCommand, TraversalEffect,
};
use super::state::{AscendConfig, AscendMode, TargetingFeedback, TargetingStatus, TraversalRequest};
use super::target::{find_ceiling, find_landing_point, probe_ceiling};
use crate::physics::AvianSurfaceProbe;
use crate::player::{
    ArmAscendPressed, CancelPressed, ControlFlags, DescendPressed, Player, PlayerConfig,
    UseAbilityPressed,
};

/// Arms or disarms the ability.
///
/// Arming switches to the targeting camera; disarming (toggle or cancel)
/// restores the default one. While a traversal runs, both inputs are
/// swallowed — the sequence cannot be cancelled mid-flight.
pub fn handle_mode_toggle(
    mut commands: Commands,
    mut query: Query<
        (
            Entity,
            &mut ArmAscendPressed,
            &mut CancelPressed,
            Has<AscendMode>,
            Has<AscendTraversal>,
        ),
        With<Player>,
    >,
    mut writer: MessageWriter<TraversalEffect>,
) {
    for (entity, mut arm, mut cancel, armed, traversing) in &mut query {
        let arm_pressed = std::mem::take(&mut arm.0);
        let cancel_pressed = std::mem::take(&mut cancel.0);

        if traversing {
            continue;
        }

        if arm_pressed && !armed {
            commands.entity(entity).insert(AscendMode);
            writer.write(TraversalEffect::ActivateTraversalCam);
        } else if (arm_pressed || cancel_pressed) && armed {
            commands.entity(entity).remove::<AscendMode>();
            writer.write(TraversalEffect::ActivateDefaultCam);
        }
    }
}

/// Routes UseAbility/Descend presses.
///
/// UseAbility starts a traversal when armed and idle, or files an Exit
/// command while waiting at the top; Descend files the return trip. Presses
/// in any other situation are no-ops.
pub fn handle_ability_commands(
    mut commands: Commands,
    spatial_query: SpatialQuery,
    mut query: Query<
        (
            Entity,
            &Transform,
            &PlayerConfig,
            &AscendConfig,
            &mut ControlFlags,
            &mut UseAbilityPressed,
            &mut DescendPressed,
            Option<&mut AscendTraversal>,
            Has<AscendMode>,
        ),
        With<Player>,
    >,
    mut writer: MessageWriter<TraversalEffect>,
) {
    for (
        entity,
        transform,
        player_config,
        config,
        mut flags,
        mut use_pressed,
        mut descend_pressed,
        traversal,
        armed,
    ) in &mut query
    {
        let use_ability = std::mem::take(&mut use_pressed.0);
        let descend = std::mem::take(&mut descend_pressed.0);

        // An active traversal only listens for Exit/Descend; the machine
        // itself rejects them outside WaitingAtTop
        if let Some(mut traversal) = traversal {
            if use_ability {
                traversal.command(TraversalCommand::Exit);
            }
            if descend {
                traversal.command(TraversalCommand::Descend);
            }
            continue;
        }

        if !use_ability || !armed {
            continue;
        }

        let probe = AvianSurfaceProbe::new(&spatial_query);
        let origin = transform.translation;

        // No ceiling in reach: stay idle, the grid already shows red
        let Some(ceiling) = find_ceiling(&probe, origin, config) else {
            continue;
        };

        let Some(landing) = find_landing_point(&probe, origin, config) else {
            debug!("ascend: no landing point resolved above {origin}, aborting");
            continue;
        };

        let Some(request) = TraversalRequest::new(origin, ceiling.point, landing) else {
            debug!("ascend: landing below ceiling at {origin}, aborting");
            continue;
        };

        let half_height = player_config.stand_height / 2.0;
        let (machine, effects) = AscendTraversal::begin(request, config, half_height);

        for effect in effects {
            if !apply_control_effect(effect, &mut flags) {
                writer.write(effect);
            }
        }

        commands.entity(entity).insert(machine);
    }
}

/// While armed and idle, probes the ceiling every tick and publishes the
/// point plus reachability for the targeting grid. Cleared otherwise.
pub fn update_targeting(
    spatial_query: SpatialQuery,
    query: Query<
        (&Transform, &AscendConfig),
        (With<Player>, With<AscendMode>, Without<AscendTraversal>),
    >,
    mut feedback: ResMut<TargetingFeedback>,
) {
    let Ok((transform, config)) = query.single() else {
        feedback.0 = None;
        return;
    };

    let probe = AvianSurfaceProbe::new(&spatial_query);
    feedback.0 = probe_ceiling(&probe, transform.translation, config).map(|hit| TargetingStatus {
        point: hit.point,
        reachable: hit.distance <= config.max_ascend_dist,
    });
}
