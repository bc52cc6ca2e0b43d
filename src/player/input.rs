use bevy::ecs::observer::On;
use bevy::prelude::{Component, Deref, DerefMut, EntityEvent, Query, Vec2};
use bevy_enhanced_input::prelude::*;

/// Move in a direction (WASD)
#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct MoveAction;

/// Look around (mouse delta)
#[derive(Debug, InputAction)]
#[action_output(Vec2)]
pub struct LookAction;

/// Jump action
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct JumpAction;

/// Sprint action (hold)
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct SprintAction;

/// Arm/disarm the ascend ability
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct ArmAscendAction;

/// Trigger the armed ability (or exit the ground at the top)
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct UseAbilityAction;

/// Descend back to the traversal origin
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct DescendAction;

/// Cancel the armed ability
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct CancelAction;

/// Hold to show the abilities menu
#[derive(Debug, InputAction)]
#[action_output(bool)]
pub struct MenuAction;

/// Stores the current movement input vector
#[derive(Component, Default, Deref, DerefMut)]
pub struct MoveInput(pub Vec2);

/// Stores the current look input delta
#[derive(Component, Default, Deref, DerefMut)]
pub struct LookInput(pub Vec2);

/// Stores whether sprint is held
#[derive(Component, Default, Deref, DerefMut)]
pub struct SprintInput(pub bool);

/// Stores whether jump was pressed this frame
#[derive(Component, Default)]
pub struct JumpPressed(pub bool);

/// Stores whether the arm-ability toggle was pressed this frame
#[derive(Component, Default)]
pub struct ArmAscendPressed(pub bool);

/// Stores whether use-ability was pressed this frame
#[derive(Component, Default)]
pub struct UseAbilityPressed(pub bool);

/// Stores whether descend was pressed this frame
#[derive(Component, Default)]
pub struct DescendPressed(pub bool);

/// Stores whether cancel was pressed this frame
#[derive(Component, Default)]
pub struct CancelPressed(pub bool);

/// Stores whether the abilities menu is held open
#[derive(Component, Default, Deref, DerefMut)]
pub struct MenuHeld(pub bool);

/// System to handle move input via observer
pub fn handle_move_input(trigger: On<Fire<MoveAction>>, mut query: Query<&mut MoveInput>) {
    if let Ok(mut move_input) = query.get_mut(trigger.event_target()) {
        move_input.0 = trigger.value;
    }
}

/// Clear move input when all movement keys are released
pub fn handle_move_end(trigger: On<Complete<MoveAction>>, mut query: Query<&mut MoveInput>) {
    if let Ok(mut move_input) = query.get_mut(trigger.event_target()) {
        move_input.0 = Vec2::ZERO;
    }
}

/// System to handle look input via observer
pub fn handle_look_input(trigger: On<Fire<LookAction>>, mut query: Query<&mut LookInput>) {
    if let Ok(mut look_input) = query.get_mut(trigger.event_target()) {
        look_input.0 = trigger.value;
    }
}

/// Handle sprint start
pub fn handle_sprint_start(trigger: On<Start<SprintAction>>, mut query: Query<&mut SprintInput>) {
    if let Ok(mut sprint) = query.get_mut(trigger.event_target()) {
        sprint.0 = true;
    }
}

/// Handle sprint end
pub fn handle_sprint_end(trigger: On<Complete<SprintAction>>, mut query: Query<&mut SprintInput>) {
    if let Ok(mut sprint) = query.get_mut(trigger.event_target()) {
        sprint.0 = false;
    }
}

/// Handle jump press
pub fn handle_jump_start(trigger: On<Start<JumpAction>>, mut query: Query<&mut JumpPressed>) {
    if let Ok(mut jump) = query.get_mut(trigger.event_target()) {
        jump.0 = true;
    }
}

/// Handle arm-ability press
pub fn handle_arm_start(
    trigger: On<Start<ArmAscendAction>>,
    mut query: Query<&mut ArmAscendPressed>,
) {
    if let Ok(mut arm) = query.get_mut(trigger.event_target()) {
        arm.0 = true;
    }
}

/// Handle use-ability press
pub fn handle_use_ability_start(
    trigger: On<Start<UseAbilityAction>>,
    mut query: Query<&mut UseAbilityPressed>,
) {
    if let Ok(mut pressed) = query.get_mut(trigger.event_target()) {
        pressed.0 = true;
    }
}

/// Handle descend press
pub fn handle_descend_start(
    trigger: On<Start<DescendAction>>,
    mut query: Query<&mut DescendPressed>,
) {
    if let Ok(mut pressed) = query.get_mut(trigger.event_target()) {
        pressed.0 = true;
    }
}

/// Handle cancel press
pub fn handle_cancel_start(
    trigger: On<Start<CancelAction>>,
    mut query: Query<&mut CancelPressed>,
) {
    if let Ok(mut pressed) = query.get_mut(trigger.event_target()) {
        pressed.0 = true;
    }
}

/// Handle abilities menu open
pub fn handle_menu_start(trigger: On<Start<MenuAction>>, mut query: Query<&mut MenuHeld>) {
    if let Ok(mut menu) = query.get_mut(trigger.event_target()) {
        menu.0 = true;
    }
}

/// Handle abilities menu close
pub fn handle_menu_end(trigger: On<Complete<MenuAction>>, mut query: Query<&mut MenuHeld>) {
    if let Ok(mut menu) = query.get_mut(trigger.event_target()) {
        menu.0 = false;
    }
}

/// Clears look input each frame
pub fn clear_look_input(mut query: Query<&mut LookInput>) {
    for mut look in &mut query {
        look.0 = Vec2::ZERO;
    }
}
