//! World module - builds and tears down the play area.

mod level;
mod plugin;
mod scatter;

pub use level::{build_level, LevelEntity, LevelLayout};
pub use plugin::WorldPlugin;
pub use scatter::scatter_positions;
