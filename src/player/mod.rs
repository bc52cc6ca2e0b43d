mod anim;
pub mod input;
mod movement;
mod plugin;
mod state;

pub use anim::AnimState;
pub use input::{
    ArmAscendPressed, CancelPressed, DescendPressed, LookInput, MenuHeld, MoveInput,
    UseAbilityPressed,
};
pub use plugin::{spawn_player, PlayerPlugin};
pub use state::*;
