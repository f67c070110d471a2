//! Vehicle module - the street sweeper, its drive model and brushes.

mod cleaning;
mod components;
mod control;
mod drive;
mod plugin;
mod spawn;
mod wheels;

pub use cleaning::CleanupQueue;
pub use components::*;
pub use drive::{brush_yaw_step, DriveModel, STEER_LERP, TORQUE_GAIN};
pub use plugin::VehiclePlugin;
pub use spawn::{spawn_sweeper, SpawnedSweeper};
pub use wheels::{wheel_force, WheelContact};
