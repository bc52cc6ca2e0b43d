use avian3d::prelude::*;
use bevy::{
    prelude::*,
    window::{CursorGrabMode, CursorOptions, PrimaryWindow},
};
use bevy_ascend::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ascend Playground".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(BevyAscendPlugin)
        .add_systems(Startup, (setup, spawn_hud, setup_cursor_grab))
        .add_systems(Update, (toggle_cursor_grab, update_hud))
        .run();
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let player = spawn_player(
        &mut commands,
        PlayerConfig::default(),
        AscendConfig::default(),
        Vec3::new(0.0, 2.0, 0.0),
    );

    // Body shell; the camera hides it while the targeting view is up
    let suit = materials.add(StandardMaterial {
        base_color: Color::srgb(0.25, 0.30, 0.50),
        perceptual_roughness: 0.6,
        ..default()
    });
    let model = commands
        .spawn((
            PlayerModel,
            Mesh3d(meshes.add(Capsule3d::new(0.4, 1.0))),
            MeshMaterial3d(suit),
            Transform::default(),
        ))
        .id();
    commands.entity(player).add_child(model);

    spawn_playground(commands, meshes, materials);
}

// ── HUD ─────────────────────────────────────────────────────────────

#[derive(Component)]
struct HudText;

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        HudText,
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
    ));
}

fn update_hud(
    player_query: Query<
        (&PlayerVelocity, &Transform, Option<&AscendTraversal>, Has<AscendMode>),
        With<Player>,
    >,
    mut hud_query: Query<&mut Text, With<HudText>>,
) {
    let Ok((velocity, transform, traversal, armed)) = player_query.single() else {
        return;
    };

    let horizontal_speed = Vec2::new(velocity.x, velocity.z).length();
    let phase = match traversal {
        Some(machine) => format!("{:?}", machine.phase()),
        None if armed => "Armed".into(),
        None => "-".into(),
    };

    for mut text in &mut hud_query {
        **text = format!(
            "Speed: {:.1} m/s\nY:     {:.1} m\nAscend: {phase}\n\n[Q] arm  [E] use/exit  [C] descend  [X] cancel  [Tab] abilities",
            horizontal_speed, transform.translation.y,
        );
    }
}

// ── Playground ──────────────────────────────────────────────────────

fn spawn_playground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_mat = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.55, 0.35),
        perceptual_roughness: 0.9,
        ..default()
    });
    let stone_a = materials.add(StandardMaterial {
        base_color: Color::srgb(0.38, 0.36, 0.40),
        perceptual_roughness: 0.85,
        ..default()
    });
    let stone_b = materials.add(StandardMaterial {
        base_color: Color::srgb(0.52, 0.50, 0.48),
        perceptual_roughness: 0.8,
        ..default()
    });
    let accent = materials.add(StandardMaterial {
        base_color: Color::srgb(0.2, 0.4, 0.6),
        perceptual_roughness: 0.5,
        metallic: 0.3,
        ..default()
    });
    let canopy_mat = materials.add(StandardMaterial {
        base_color: Color::srgba(0.8, 0.8, 0.3, 0.35),
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.9,
        ..default()
    });

    // ── Ground ───────────────────────────────────────────────────
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(200.0, 200.0))),
        MeshMaterial3d(ground_mat),
        Transform::from_translation(Vec3::ZERO),
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
        CollisionLayers::new(GameLayer::World, [GameLayer::Player]),
    ));

    // ══════════════════════════════════════════════════════════════
    // Layout: one station per row along Z.
    //
    //   Z =  10  SINGLE SLAB    one ceiling 6m up, open sky above
    //   Z =  25  STACKED TOWER  floors every 6m, four storeys
    //   Z =  40  OUT OF REACH   ceiling 14m up, past ability range
    //   Z =  55  CANOPY         passable dressing under a real slab
    //   Z = -15  DEEP SHAFT     one thick slab far overhead
    // ══════════════════════════════════════════════════════════════

    // ── SINGLE SLAB  (Z = 10) ────────────────────────────────────
    // One ceiling within reach; ascending lands on its top face.

    spawn_slab(&mut commands, &mut meshes, stone_a.clone(),
        Vec3::new(10.0, 0.5, 10.0), Vec3::new(0.0, 6.0, 10.0));

    // ── STACKED TOWER  (Z = 25) ──────────────────────────────────
    // Four storeys. Ascending from inside one storey targets only the
    // next floor up; repeat to climb the whole tower.

    for storey in 1..=4 {
        let y = storey as f32 * 6.0;
        let mat = if storey % 2 == 0 { stone_a.clone() } else { stone_b.clone() };
        spawn_slab(&mut commands, &mut meshes, mat,
            Vec3::new(12.0, 0.5, 12.0), Vec3::new(20.0, y, 25.0));
    }

    // Roof marker so the top is easy to spot from the ground
    spawn_slab(&mut commands, &mut meshes, accent.clone(),
        Vec3::new(2.0, 0.5, 2.0), Vec3::new(20.0, 24.8, 25.0));

    // ── OUT OF REACH  (Z = 40) ───────────────────────────────────
    // Ceiling above max ascend distance; the grid shows red here.

    spawn_slab(&mut commands, &mut meshes, stone_b.clone(),
        Vec3::new(10.0, 0.5, 10.0), Vec3::new(-20.0, 14.0, 40.0));

    // ── CANOPY  (Z = 55) ─────────────────────────────────────────
    // A passable awning below a real slab. The probe ignores the
    // awning and targets the slab behind it.

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(10.0, 0.2, 10.0))),
        MeshMaterial3d(canopy_mat),
        Transform::from_translation(Vec3::new(0.0, 4.0, 55.0)),
        RigidBody::Static,
        Collider::cuboid(10.0, 0.2, 10.0),
        CollisionLayers::new(GameLayer::Passable, LayerMask::NONE),
        Sensor,
    ));
    spawn_slab(&mut commands, &mut meshes, stone_a.clone(),
        Vec3::new(10.0, 0.5, 10.0), Vec3::new(0.0, 8.0, 55.0));

    // ── DEEP SHAFT  (Z = -15) ────────────────────────────────────
    // Thick slab near the range limit; the pass-through takes its time.

    spawn_slab(&mut commands, &mut meshes, stone_b.clone(),
        Vec3::new(14.0, 3.0, 14.0), Vec3::new(0.0, 9.5, -15.0));

    // ══════════════════════════════════════════════════════════════
    // LIGHTING
    // ══════════════════════════════════════════════════════════════

    commands.spawn((
        DirectionalLight {
            illuminance: 14000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.7, 0.5, 0.0)),
    ));

    commands.spawn(AmbientLight {
        color: Color::srgb(0.6, 0.7, 0.9),
        brightness: 350.0,
        affects_lightmapped_meshes: true,
    });
}

fn spawn_slab(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    size: Vec3,
    position: Vec3,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(material),
        Transform::from_translation(position),
        RigidBody::Static,
        Collider::cuboid(size.x, size.y, size.z),
        CollisionLayers::new(GameLayer::World, [GameLayer::Player]),
    ));
}

// ── Cursor grab ──────────────────────────────────────────────────────

fn setup_cursor_grab(mut cursor_query: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    if let Ok(mut cursor) = cursor_query.single_mut() {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}

fn toggle_cursor_grab(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut cursor_query: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Ok(mut cursor) = cursor_query.single_mut() else {
        return;
    };

    if keyboard.just_pressed(KeyCode::Escape) {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    } else if mouse.just_pressed(MouseButton::Left) && cursor.grab_mode == CursorGrabMode::None {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}
