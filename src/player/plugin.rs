use avian3d::prelude::*;
use bevy::prelude::*;
use bevy_enhanced_input::prelude::*;

use super::anim::{apply_traversal_anim, damp_move_speed, AnimState};
use super::input::CancelAction;
use super::input::*;
use super::movement::*;
use super::state::*;
use crate::ascend::AscendConfig;
use crate::camera::{CameraConfig, CameraPitch, CameraYaw, MainCamera, PitchAngle};
use crate::physics::GameLayer;

/// Plugin for the player controller the ascend ability rides on
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EnhancedInputPlugin);

        // Register input context for player
        app.add_input_context::<Player>();

        // Input observers
        app.add_observer(handle_move_input);
        app.add_observer(handle_move_end);
        app.add_observer(handle_look_input);
        app.add_observer(handle_sprint_start);
        app.add_observer(handle_sprint_end);
        app.add_observer(handle_jump_start);
        app.add_observer(handle_arm_start);
        app.add_observer(handle_use_ability_start);
        app.add_observer(handle_descend_start);
        app.add_observer(handle_cancel_start);
        app.add_observer(handle_menu_start);
        app.add_observer(handle_menu_end);

        // Fixed update systems for physics
        app.add_systems(
            FixedUpdate,
            (
                update_grounded_state,
                update_sprint_state,
                handle_jump,
                apply_movement,
                apply_gravity,
                apply_velocity,
            )
                .chain(),
        );

        // Animation parameter plumbing
        app.add_systems(Update, (damp_move_speed, apply_traversal_anim));

        // Clear look input at end of frame
        app.add_systems(Last, clear_look_input);
    }
}

/// Spawns the player entity with all required components, plus the
/// yaw → pitch → camera rig that follows it. Returns the player body
/// so callers can attach a visible model to it.
pub fn spawn_player(
    commands: &mut Commands,
    config: PlayerConfig,
    ascend_config: AscendConfig,
    position: Vec3,
) -> Entity {
    // Spawn yaw entity (rotates on Y axis for left/right look)
    let yaw_entity = commands
        .spawn((
            CameraYaw,
            Transform::from_translation(position),
            Visibility::default(),
        ))
        .id();

    // Spawn pitch entity as child (rotates on X axis for up/down look)
    let pitch_entity = commands
        .spawn((
            CameraPitch,
            PitchAngle::default(),
            CameraConfig::default(),
            Transform::from_translation(Vec3::new(0.0, config.stand_height / 2.0 - 0.1, 0.0)),
            Visibility::default(),
        ))
        .id();

    // Spawn camera as child of pitch
    let camera_entity = commands
        .spawn((
            MainCamera::default(),
            Camera3d::default(),
            Projection::Perspective(PerspectiveProjection {
                fov: 90.0_f32.to_radians(),
                ..default()
            }),
            Transform::default(),
        ))
        .id();

    // Set up hierarchy: yaw -> pitch -> camera
    commands.entity(yaw_entity).add_child(pitch_entity);
    commands.entity(pitch_entity).add_child(camera_entity);

    // Spawn player body
    let capsule_height = config.stand_height - config.radius * 2.0;

    commands
        .spawn((
            Player,
            config,
            ascend_config,
            PlayerVelocity::default(),
            ControlFlags::default(),
            AnimState::default(),
        ))
        .insert((
            // Input state
            MoveInput::default(),
            LookInput::default(),
            SprintInput::default(),
            JumpPressed::default(),
            ArmAscendPressed::default(),
            UseAbilityPressed::default(),
            DescendPressed::default(),
            CancelPressed::default(),
            MenuHeld::default(),
        ))
        .insert((
            // Physics - Dynamic body with locked rotation; gravity is ours
            RigidBody::Dynamic,
            Collider::capsule(config.radius, capsule_height),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Default, GameLayer::World]),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            TranslationInterpolation,
            Friction::new(0.0),
            Restitution::new(0.0),
            GravityScale(0.0),
        ))
        .insert((
            // Transform
            Transform::from_translation(position),
            Visibility::default(),
        ))
        .insert(
            // Input bindings
            actions!(Player[
                (
                    Action::<MoveAction>::new(),
                    bindings![
                        (KeyCode::KeyW, SwizzleAxis::YXZ),
                        (KeyCode::KeyS, SwizzleAxis::YXZ, Negate::all()),
                        KeyCode::KeyD,
                        (KeyCode::KeyA, Negate::all()),
                    ],
                ),
                (
                    Action::<LookAction>::new(),
                    bindings![
                        Binding::mouse_motion(),
                    ],
                ),
                (
                    Action::<JumpAction>::new(),
                    bindings![KeyCode::Space, GamepadButton::South],
                ),
                (
                    Action::<SprintAction>::new(),
                    bindings![KeyCode::ShiftLeft, GamepadButton::LeftTrigger],
                ),
                (
                    Action::<ArmAscendAction>::new(),
                    bindings![KeyCode::KeyQ, GamepadButton::North],
                ),
                (
                    Action::<UseAbilityAction>::new(),
                    bindings![KeyCode::KeyE, GamepadButton::West],
                ),
                (
                    Action::<DescendAction>::new(),
                    bindings![KeyCode::KeyC, GamepadButton::East],
                ),
                (
                    Action::<CancelAction>::new(),
                    bindings![KeyCode::KeyX, GamepadButton::Select],
                ),
                (
                    Action::<MenuAction>::new(),
                    bindings![KeyCode::Tab, GamepadButton::Start],
                ),
            ]),
        )
        .id()
}
