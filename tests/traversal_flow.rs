//! Full ability flow: probe the world, resolve a landing point, then run
//! the motion sequence to both of its endings.

use std::time::Duration;

use avian3d::prelude::PhysicsPlugins;
use bevy::prelude::*;
use bevy_ascend::ascend::{drive_traversal, TraversalCommand};
use bevy_ascend::ascend::target::{find_ceiling, find_landing_point};
use bevy_ascend::physics::{SurfaceHit, SurfaceProbe};
use bevy_ascend::player::{ArmAscendPressed, CancelPressed, DescendPressed, UseAbilityPressed};
use bevy_ascend::prelude::*;

const DT: f32 = 1.0 / 60.0;
const HALF_HEIGHT: f32 = 0.9;

/// Deterministic world of infinite horizontal planes
struct PlaneStack {
    heights: Vec<f32>,
}

impl SurfaceProbe for PlaneStack {
    fn cast(&self, origin: Vec3, direction: Dir3, max_distance: f32) -> Option<SurfaceHit> {
        let up = direction.y > 0.0;
        self.heights
            .iter()
            .filter_map(|&h| {
                let dist = if up { h - origin.y } else { origin.y - h };
                (dist > 0.0 && dist <= max_distance).then_some((h, dist))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(h, dist)| SurfaceHit {
                point: Vec3::new(origin.x, h, origin.z),
                distance: dist,
            })
    }
}

/// Builds a traversal request the way the activation system does: probe
/// up for the ceiling, walk down from the sky for the landing point.
fn resolve_request(world: &PlaneStack, origin: Vec3, config: &AscendConfig) -> TraversalRequest {
    let ceiling = find_ceiling(world, origin, config).expect("ceiling in reach");
    let landing = find_landing_point(world, origin, config).expect("landing point");
    TraversalRequest::new(origin, ceiling.point, landing).expect("ordered points")
}

#[test]
fn ground_floor_to_rooftop_exit() {
    let config = AscendConfig::default();
    // Ground, one storey at 6m, roof at 12m
    let world = PlaneStack {
        heights: vec![0.0, 6.0, 12.0],
    };
    let origin = Vec3::new(3.0, 0.0, -2.0);

    let request = resolve_request(&world, origin, &config);
    assert_eq!(request.ceiling.y, 6.0);
    // Landing resolves to the storey directly above, not the roof
    assert_eq!(request.target.y, 6.0);

    let (mut machine, entry) = AscendTraversal::begin(request, &config, HALF_HEIGHT);
    assert!(entry.contains(&TraversalEffect::LockControls));

    let mut position = origin;
    for _ in 0..10_000 {
        let step = machine.tick(DT);
        if let Some(p) = step.position {
            // The body only ever moves along the vertical axis
            assert_eq!(p.x, origin.x);
            assert_eq!(p.z, origin.z);
            assert!(p.y >= position.y - 1e-4, "no downward motion on the way up");
            position = p;
        }
        if machine.phase() == TraversalPhase::WaitingAtTop {
            break;
        }
    }
    assert_eq!(machine.phase(), TraversalPhase::WaitingAtTop);
    assert_eq!(position.y, request.target.y - HALF_HEIGHT);

    assert!(machine.command(TraversalCommand::Exit));
    let mut effects = Vec::new();
    let mut done = false;
    for _ in 0..10_000 {
        let step = machine.tick(DT);
        if let Some(p) = step.position {
            position = p;
        }
        effects.extend(step.effects);
        if step.done {
            done = true;
            break;
        }
    }

    assert!(done);
    // Standing on the storey floor, feet at surface level
    assert_eq!(position, Vec3::new(origin.x, 6.0 + HALF_HEIGHT, origin.z));
    assert!(effects.contains(&TraversalEffect::UnlockControls));
    assert!(effects.contains(&TraversalEffect::ActivateDefaultCam));
}

#[test]
fn descend_returns_exactly_to_origin() {
    let config = AscendConfig::default();
    let world = PlaneStack {
        heights: vec![0.0, 8.0],
    };
    let origin = Vec3::new(-1.0, 0.0, 4.0);

    let request = resolve_request(&world, origin, &config);
    let (mut machine, _) = AscendTraversal::begin(request, &config, HALF_HEIGHT);

    for _ in 0..10_000 {
        machine.tick(DT);
        if machine.phase() == TraversalPhase::WaitingAtTop {
            break;
        }
    }
    assert!(machine.command(TraversalCommand::Descend));

    let mut position = None;
    for _ in 0..10_000 {
        let step = machine.tick(DT);
        if step.position.is_some() {
            position = step.position;
        }
        if step.done {
            break;
        }
    }

    assert_eq!(machine.phase(), TraversalPhase::Idle);
    assert_eq!(position, Some(origin));
}

#[test]
fn presses_are_swallowed_mid_traversal() {
    // Headless app with the real ability systems, physics included so the
    // activation probe's spatial query can be built
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        bevy::transform::TransformPlugin,
        bevy::asset::AssetPlugin::default(),
        bevy::scene::ScenePlugin,
    ));
    app.init_asset::<Mesh>();
    app.add_plugins((PhysicsPlugins::default(), AscendPlugin));

    let config = AscendConfig::default();
    let origin = Vec3::new(1.0, 0.0, 2.0);
    let request = TraversalRequest::new(
        origin,
        Vec3::new(1.0, 6.0, 2.0),
        Vec3::new(1.0, 6.0, 2.0),
    )
    .expect("ordered points");
    let (machine, entry) = AscendTraversal::begin(request, &config, HALF_HEIGHT);
    let mut flags = ControlFlags::default();
    for effect in entry {
        bevy_ascend::ascend::apply_control_effect(effect, &mut flags);
    }

    let player = app
        .world_mut()
        .spawn((
            Player,
            Transform::from_translation(origin),
            PlayerConfig::default(),
            config,
            flags,
            PlayerVelocity::default(),
            AscendMode,
            machine,
            ArmAscendPressed::default(),
            UseAbilityPressed::default(),
            DescendPressed::default(),
            CancelPressed::default(),
        ))
        .id();

    app.update();

    // A second activation, a cancel, and a disarm toggle all land while
    // the machine is still in its approach pre-roll
    app.world_mut().get_mut::<UseAbilityPressed>(player).unwrap().0 = true;
    app.world_mut().get_mut::<CancelPressed>(player).unwrap().0 = true;
    app.world_mut().get_mut::<ArmAscendPressed>(player).unwrap().0 = true;
    app.update();
    app.update();

    // All three were consumed with no observable effect: same traversal,
    // same phase, still armed, controls still locked, body untouched
    let machine = app
        .world()
        .get::<AscendTraversal>(player)
        .expect("traversal still active");
    assert_eq!(machine.phase(), TraversalPhase::ApproachingCeiling);
    assert!(app.world().get::<AscendMode>(player).is_some());

    let flags = app.world().get::<ControlFlags>(player).unwrap();
    assert!(!flags.can_move);
    assert!(!flags.can_use_gravity);
    assert_eq!(
        app.world().get::<Transform>(player).unwrap().translation,
        origin
    );

    assert!(!app.world().get::<UseAbilityPressed>(player).unwrap().0);
    assert!(!app.world().get::<CancelPressed>(player).unwrap().0);
    assert!(!app.world().get::<ArmAscendPressed>(player).unwrap().0);
}

#[test]
fn drive_system_runs_a_traversal_to_completion() {
    let mut app = App::new();
    app.init_resource::<Time>();
    app.add_message::<TraversalEffect>();
    app.add_systems(Update, drive_traversal);

    let config = AscendConfig::default();
    let origin = Vec3::ZERO;
    let request = TraversalRequest::new(
        origin,
        Vec3::new(0.0, 5.0, 0.0),
        Vec3::new(0.0, 5.0, 0.0),
    )
    .expect("ordered points");
    let (machine, entry) = AscendTraversal::begin(request, &config, HALF_HEIGHT);

    let mut flags = ControlFlags::default();
    for effect in entry {
        bevy_ascend::ascend::apply_control_effect(effect, &mut flags);
    }
    assert!(!flags.can_move);

    let player = app
        .world_mut()
        .spawn((
            Transform::from_translation(origin),
            machine,
            flags,
            PlayerVelocity(Vec3::new(3.0, 0.0, 0.0)),
        ))
        .id();

    let step = Duration::from_secs_f32(DT);
    let mut ticks = 0;
    // Through approach and pass-through to the wait phase
    while app.world().get::<AscendTraversal>(player).map(AscendTraversal::phase)
        != Some(TraversalPhase::WaitingAtTop)
    {
        app.world_mut().resource_mut::<Time>().advance_by(step);
        app.update();
        ticks += 1;
        assert!(ticks < 10_000, "never reached the wait phase");
    }

    // The machine owns the body: velocity stays zeroed while active
    let velocity = app.world().get::<PlayerVelocity>(player).expect("velocity");
    assert_eq!(velocity.0, Vec3::ZERO);

    app.world_mut()
        .get_mut::<AscendTraversal>(player)
        .expect("active traversal")
        .command(TraversalCommand::Exit);

    while app.world().get::<AscendTraversal>(player).is_some() {
        app.world_mut().resource_mut::<Time>().advance_by(step);
        app.update();
        ticks += 1;
        assert!(ticks < 10_000, "traversal never finished");
    }

    // Finished: standing on the surface with controls restored
    let transform = app.world().get::<Transform>(player).expect("transform");
    assert_eq!(transform.translation, Vec3::new(0.0, 5.0 + HALF_HEIGHT, 0.0));
    let flags = app.world().get::<ControlFlags>(player).expect("flags");
    assert!(flags.can_move);
    assert!(flags.can_use_gravity);
}
