use bevy::prelude::*;

use super::menu::{setup_abilities_menu, update_abilities_menu};
use super::overlay::{
    setup_exit_prompt, setup_targeting_grid, update_exit_prompt, update_targeting_grid,
};

/// Plugin for the targeting grid, traversal prompts, and abilities menu
pub struct AscendUiPlugin;

impl Plugin for AscendUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (setup_targeting_grid, setup_exit_prompt, setup_abilities_menu),
        );

        app.add_systems(
            Update,
            (update_targeting_grid, update_exit_prompt, update_abilities_menu),
        );
    }
}
