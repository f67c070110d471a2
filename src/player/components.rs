//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Marker for the child entity items are held at.
#[derive(Component)]
pub struct HoldAnchor;

/// Grounded/airborne locomotion state.
///
/// Timestamps are virtual-clock seconds; `None` means "not recently".
#[derive(Component, Debug, Default, Clone)]
pub struct Locomotion {
    pub vertical_speed: f32,
    pub is_grounded: bool,
    pub is_jumping: bool,
    pub is_falling: bool,
    pub last_grounded_time: Option<f32>,
    pub jump_requested_time: Option<f32>,
}

/// What the player is holding, looking at, or driving.
///
/// `held_object` and `pickup_candidate` never name the same entity: an item
/// only becomes held by being the candidate, which is then cleared.
#[derive(Component, Debug, Default)]
pub struct InteractionState {
    pub is_driving: bool,
    pub held_object: Option<Entity>,
    pub pickup_candidate: Option<Entity>,
}

/// Scene references the player needs for interactions.
///
/// `vehicle` and `seat` may be unset in a badly authored level; the
/// interactions that need them then decline and log.
#[derive(Component, Debug)]
pub struct PlayerLinks {
    pub hold_anchor: Entity,
    pub vehicle: Option<Entity>,
    pub seat: Option<Entity>,
}
