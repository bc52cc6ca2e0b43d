mod menu;
mod overlay;
mod plugin;

pub use menu::AbilitiesMenu;
pub use overlay::{ExitPrompt, TargetingGrid};
pub use plugin::AscendUiPlugin;
