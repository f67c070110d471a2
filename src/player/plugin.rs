//! Player plugin - locomotion, animation and interactions.

use bevy::prelude::*;

use crate::core::GameState;

use super::animator::{advance_animators, AnimationEvent};
use super::interaction::{attach_object, player_interaction, track_pickup_candidate};
use super::movement::player_locomotion;

/// Player plugin - handles on-foot movement, pickup and vehicle entry.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimationEvent>().add_systems(
            Update,
            (
                player_locomotion,
                track_pickup_candidate,
                player_interaction,
                advance_animators,
                attach_object,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
    }
}
