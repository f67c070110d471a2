//! Camera plugin - rig priority switching and main camera follow.

use bevy::prelude::*;

use crate::core::GameState;

use super::rig::{drive_main_camera, orbit_live_rig, switch_camera_priority};

/// Camera plugin - picks and follows the live rig.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            (switch_camera_priority, orbit_live_rig, drive_main_camera)
                .chain()
                .after(TransformSystem::TransformPropagate)
                .run_if(in_state(GameState::InGame)),
        );
    }
}
