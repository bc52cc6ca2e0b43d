use bevy::prelude::*;

use crate::ascend::TraversalEffect;
use crate::player::Player;

/// Which rig the camera is blending toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    #[default]
    Default,
    /// Wider targeting/traversal view; the player model is hidden
    Traversal,
}

/// The player's camera, with traversal-mode blending settings
#[derive(Component)]
pub struct MainCamera {
    /// FOV in default mode, radians
    pub base_fov: f32,
    /// FOV while the ability is armed or traversing, radians
    pub traversal_fov: f32,
    /// Current FOV
    pub current_fov: f32,
    /// FOV transition speed
    pub fov_speed: f32,
    pub mode: CameraMode,
}

impl Default for MainCamera {
    fn default() -> Self {
        Self {
            base_fov: 90.0_f32.to_radians(),
            traversal_fov: 105.0_f32.to_radians(),
            current_fov: 90.0_f32.to_radians(),
            fov_speed: 8.0,
            mode: CameraMode::Default,
        }
    }
}

/// Marker: mesh entities belonging to the player's own model
#[derive(Component)]
pub struct PlayerModel;

/// Opaque shell around the player while passing through geometry, so
/// nothing but the player's own dressing is drawn
#[derive(Component)]
pub struct PassThroughVeil;

/// Background dressing shown during the upward pass-through
#[derive(Component)]
pub struct AscendBackdrop;

/// Background dressing shown during the descent
#[derive(Component)]
pub struct DescendBackdrop;

/// Spawns the hidden veil and backdrop shells
pub fn setup_traversal_dressing(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let veil_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.02, 0.02, 0.04),
        unlit: true,
        cull_mode: None,
        ..default()
    });
    let ascend_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.05, 0.25, 0.35),
        unlit: true,
        cull_mode: None,
        ..default()
    });
    let descend_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.18, 0.05),
        unlit: true,
        cull_mode: None,
        ..default()
    });

    commands.spawn((
        PassThroughVeil,
        Mesh3d(meshes.add(Sphere::new(80.0))),
        MeshMaterial3d(veil_material),
        Transform::default(),
        Visibility::Hidden,
    ));
    commands.spawn((
        AscendBackdrop,
        Mesh3d(meshes.add(Sphere::new(60.0))),
        MeshMaterial3d(ascend_material),
        Transform::default(),
        Visibility::Hidden,
    ));
    commands.spawn((
        DescendBackdrop,
        Mesh3d(meshes.add(Sphere::new(60.0))),
        MeshMaterial3d(descend_material),
        Transform::default(),
        Visibility::Hidden,
    ));
}

/// Applies the traversal machine's camera and render-mode effects.
///
/// Mode switches are idempotent: re-activating the mode already in use
/// does nothing, matching the collaborator contract.
pub fn apply_camera_effects(
    mut reader: MessageReader<TraversalEffect>,
    mut camera_query: Query<&mut MainCamera>,
    mut veil_query: Query<
        &mut Visibility,
        (With<PassThroughVeil>, Without<AscendBackdrop>, Without<DescendBackdrop>),
    >,
    mut ascend_query: Query<
        &mut Visibility,
        (With<AscendBackdrop>, Without<PassThroughVeil>, Without<DescendBackdrop>),
    >,
    mut descend_query: Query<
        &mut Visibility,
        (With<DescendBackdrop>, Without<PassThroughVeil>, Without<AscendBackdrop>),
    >,
    mut model_query: Query<
        &mut Visibility,
        (
            With<PlayerModel>,
            Without<PassThroughVeil>,
            Without<AscendBackdrop>,
            Without<DescendBackdrop>,
        ),
    >,
) {
    for effect in reader.read() {
        match effect {
            TraversalEffect::ActivateTraversalCam => {
                for mut camera in &mut camera_query {
                    if camera.mode != CameraMode::Traversal {
                        camera.mode = CameraMode::Traversal;
                        for mut visibility in &mut model_query {
                            *visibility = Visibility::Hidden;
                        }
                    }
                }
            }
            TraversalEffect::ActivateDefaultCam => {
                for mut camera in &mut camera_query {
                    if camera.mode != CameraMode::Default {
                        camera.mode = CameraMode::Default;
                        for mut visibility in &mut model_query {
                            *visibility = Visibility::Inherited;
                        }
                    }
                }
            }
            TraversalEffect::EnterPassThroughRender => {
                for mut visibility in &mut veil_query {
                    *visibility = Visibility::Visible;
                }
            }
            TraversalEffect::RestoreFullRender => {
                for mut visibility in &mut veil_query {
                    *visibility = Visibility::Hidden;
                }
            }
            TraversalEffect::ShowAscendBackdrop => {
                for mut visibility in &mut ascend_query {
                    *visibility = Visibility::Visible;
                }
            }
            TraversalEffect::ShowDescendBackdrop => {
                for mut visibility in &mut descend_query {
                    *visibility = Visibility::Visible;
                }
            }
            TraversalEffect::HideBackdrop => {
                for mut visibility in &mut ascend_query {
                    *visibility = Visibility::Hidden;
                }
                for mut visibility in &mut descend_query {
                    *visibility = Visibility::Hidden;
                }
            }
            _ => {}
        }
    }
}

/// Keeps the veil and backdrops centered on the player
pub fn follow_player_dressing(
    player_query: Query<&Transform, With<Player>>,
    mut dressing_query: Query<
        &mut Transform,
        (
            Or<(With<PassThroughVeil>, With<AscendBackdrop>, With<DescendBackdrop>)>,
            Without<Player>,
        ),
    >,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };

    for mut transform in &mut dressing_query {
        transform.translation = player_transform.translation;
    }
}

/// Eases the camera FOV toward the active mode's setting
pub fn update_camera_fov(
    mut camera_query: Query<(&mut Projection, &mut MainCamera)>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();

    for (mut projection, mut camera) in &mut camera_query {
        let target_fov = match camera.mode {
            CameraMode::Default => camera.base_fov,
            CameraMode::Traversal => camera.traversal_fov,
        };

        camera.current_fov += (target_fov - camera.current_fov) * camera.fov_speed * dt;

        if let Projection::Perspective(ref mut persp) = *projection {
            persp.fov = camera.current_fov;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effects_app() -> App {
        let mut app = App::new();
        app.add_message::<TraversalEffect>();
        app.add_systems(Update, apply_camera_effects);
        app
    }

    #[test]
    fn traversal_cam_hides_the_player_model() {
        let mut app = effects_app();
        let camera = app.world_mut().spawn(MainCamera::default()).id();
        let model = app
            .world_mut()
            .spawn((PlayerModel, Visibility::Inherited))
            .id();

        app.world_mut()
            .write_message(TraversalEffect::ActivateTraversalCam);
        app.update();

        assert_eq!(
            app.world().get::<MainCamera>(camera).unwrap().mode,
            CameraMode::Traversal
        );
        assert_eq!(
            *app.world().get::<Visibility>(model).unwrap(),
            Visibility::Hidden
        );

        app.world_mut()
            .write_message(TraversalEffect::ActivateDefaultCam);
        app.update();

        assert_eq!(
            app.world().get::<MainCamera>(camera).unwrap().mode,
            CameraMode::Default
        );
        assert_eq!(
            *app.world().get::<Visibility>(model).unwrap(),
            Visibility::Inherited
        );
    }

    #[test]
    fn reactivating_the_active_mode_is_a_no_op() {
        let mut app = effects_app();
        app.world_mut().spawn(MainCamera::default());
        let model = app.world_mut().spawn((PlayerModel, Visibility::Hidden)).id();

        // Default mode is already active; the model's visibility is
        // someone else's to manage and must not be touched
        app.world_mut()
            .write_message(TraversalEffect::ActivateDefaultCam);
        app.update();

        assert_eq!(
            *app.world().get::<Visibility>(model).unwrap(),
            Visibility::Hidden
        );
    }
}
