//! UI module - HUD and win/lose panels.

mod hud;
mod plugin;

pub use hud::{HudRoot, HudText};
pub use plugin::UiPlugin;
