//! Player module - player entity, locomotion state machine and interactions.

mod animator;
mod components;
mod interaction;
mod locomotion;
mod movement;
mod plugin;

pub use animator::{AnimState, AnimationEvent, AnimationEventKind, Animator};
pub use components::*;
pub use interaction::{board, can_start_pickup, leave};
pub use locomotion::{movement_direction, rotate_towards, LocomotionFrame, LocomotionInput};
pub use movement::spawn_player;
pub use plugin::PlayerPlugin;
