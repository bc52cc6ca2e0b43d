mod machine;
mod mode;
mod plugin;
mod state;
pub mod target;
pub mod timing;

pub use machine::*;
pub use mode::*;
pub use plugin::AscendPlugin;
pub use state::*;
