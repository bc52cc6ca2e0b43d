use bevy::prelude::*;

use crate::ascend::{TargetingFeedback, TraversalEffect};

/// World-space reticle drawn just under the probed ceiling point
#[derive(Component)]
pub struct TargetingGrid {
    reachable_material: Handle<StandardMaterial>,
    blocked_material: Handle<StandardMaterial>,
}

/// How far below the hit point the grid sits, so it never z-fights the ceiling
const GRID_DROP: f32 = 0.05;

/// Screen-space prompt shown while waiting at the top
#[derive(Component)]
pub struct ExitPrompt;

pub fn setup_targeting_grid(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let reachable_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.2, 0.9, 0.3, 0.6),
        unlit: true,
        cull_mode: None,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });
    let blocked_material = materials.add(StandardMaterial {
        base_color: Color::srgba(0.9, 0.2, 0.2, 0.6),
        unlit: true,
        cull_mode: None,
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    commands.spawn((
        TargetingGrid {
            reachable_material: reachable_material.clone(),
            blocked_material,
        },
        Mesh3d(meshes.add(Plane3d::default().mesh().size(2.0, 2.0))),
        MeshMaterial3d(reachable_material),
        Transform::default(),
        Visibility::Hidden,
    ));
}

pub fn setup_exit_prompt(mut commands: Commands) {
    commands.spawn((
        ExitPrompt,
        Text::new("[E] Exit here    [C] Descend"),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(80.0),
            left: Val::Percent(50.0),
            margin: UiRect::left(Val::Px(-150.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
        Visibility::Hidden,
    ));
}

/// Moves the grid under the current ceiling hit and recolors it by
/// whether the hit is within ability reach
pub fn update_targeting_grid(
    feedback: Res<TargetingFeedback>,
    mut query: Query<(
        &TargetingGrid,
        &mut Transform,
        &mut MeshMaterial3d<StandardMaterial>,
        &mut Visibility,
    )>,
) {
    let Ok((grid, mut transform, mut material, mut visibility)) = query.single_mut() else {
        return;
    };

    match feedback.0 {
        Some(status) => {
            transform.translation = status.point - Vec3::Y * GRID_DROP;
            material.0 = if status.reachable {
                grid.reachable_material.clone()
            } else {
                grid.blocked_material.clone()
            };
            *visibility = Visibility::Visible;
        }
        None => {
            *visibility = Visibility::Hidden;
        }
    }
}

/// Shows and hides the wait-phase prompt on the machine's cue
pub fn update_exit_prompt(
    mut reader: MessageReader<TraversalEffect>,
    mut query: Query<&mut Visibility, With<ExitPrompt>>,
) {
    for effect in reader.read() {
        let shown = match effect {
            TraversalEffect::ShowExitPrompt => true,
            TraversalEffect::HideExitPrompt => false,
            _ => continue,
        };

        for mut visibility in &mut query {
            *visibility = if shown {
                Visibility::Visible
            } else {
                Visibility::Hidden
            };
        }
    }
}
