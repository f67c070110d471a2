//! Vehicle plugin - sweeper driving, wheels and brush cleaning.

use bevy::prelude::*;
use bevy_rapier3d::prelude::PhysicsSet;

use crate::core::GameState;

use super::cleaning::{brush_contacts, clear_cleanups, run_cleanups, CleanupQueue};
use super::control::{apply_drive, spin_brushes, sweeper_input};
use super::wheels::{pose_wheel_models, solve_wheels};

/// Vehicle plugin - runs the sweeper while in game.
pub struct VehiclePlugin;

impl Plugin for VehiclePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CleanupQueue>()
            .add_systems(OnExit(GameState::InGame), clear_cleanups)
            .add_systems(
                Update,
                (
                    (sweeper_input, spin_brushes).chain(),
                    (brush_contacts, run_cleanups).chain(),
                )
                    .run_if(in_state(GameState::InGame)),
            )
            // Drive after input, like a late update, and before rapier reads forces
            .add_systems(
                PostUpdate,
                (apply_drive, solve_wheels, pose_wheel_models)
                    .chain()
                    .before(PhysicsSet::SyncBackend)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}
