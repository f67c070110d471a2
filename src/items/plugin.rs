//! Items plugin - garbage bags, rubbish and the dumpster.

use bevy::prelude::*;

use crate::core::GameState;

use super::dumpster::collect_into_dumpster;

/// Items plugin - runs the dumpster collector while playing.
pub struct ItemsPlugin;

impl Plugin for ItemsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            collect_into_dumpster.run_if(in_state(GameState::InGame)),
        );
    }
}
