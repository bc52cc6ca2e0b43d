use bevy::prelude::*;

use super::machine::{drive_traversal, TraversalEffect};
use super::mode::{handle_ability_commands, handle_mode_toggle, update_targeting};
use super::state::TargetingFeedback;

/// Plugin for the Ascend ability: mode toggling, targeting, and the
/// traversal state machine.
pub struct AscendPlugin;

impl Plugin for AscendPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<TraversalEffect>();
        app.init_resource::<TargetingFeedback>();

        app.add_systems(
            Update,
            (
                handle_mode_toggle,
                handle_ability_commands,
                drive_traversal,
                update_targeting,
            )
                .chain(),
        );
    }
}
