//! Camera module - follow rigs for the player and the sweeper.

mod plugin;
mod rig;

pub use plugin::CameraPlugin;
pub use rig::*;
