mod layers;
mod plugin;
mod probe;

pub use layers::*;
pub use plugin::PhysicsPlugin;
pub use probe::*;
