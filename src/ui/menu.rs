use bevy::prelude::*;

use crate::player::{MenuHeld, Player};

/// Hold-to-show abilities panel
#[derive(Component)]
pub struct AbilitiesMenu;

pub fn setup_abilities_menu(mut commands: Commands) {
    commands
        .spawn((
            AbilitiesMenu,
            Node {
                position_type: PositionType::Absolute,
                top: Val::Percent(25.0),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-140.0)),
                width: Val::Px(280.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(8.0),
                padding: UiRect::all(Val::Px(16.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.05, 0.05, 0.08, 0.85)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Abilities"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::srgb(0.95, 0.95, 0.95)),
            ));
            parent.spawn((
                Text::new("[Q] Ascend — travel up through ceilings"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.85, 0.9)),
            ));
            parent.spawn((
                Text::new("[X] Cancel targeting"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.7, 0.7, 0.7)),
            ));
        });
}

/// Shows the panel while the menu button is held
pub fn update_abilities_menu(
    player_query: Query<&MenuHeld, With<Player>>,
    mut menu_query: Query<&mut Visibility, With<AbilitiesMenu>>,
) {
    let Ok(held) = player_query.single() else {
        return;
    };

    for mut visibility in &mut menu_query {
        *visibility = if held.0 {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}
