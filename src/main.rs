//! Sweepo - Entry Point
//!
//! Controls:
//! - WASD: Move / drive
//! - Mouse: Orbit camera
//! - Shift: Run
//! - Space: Jump / brake
//! - E: Pick up or drop a bag
//! - F: Enter or leave the sweeper
//! - T: Toggle the brushes

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Sweepo".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Physics
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())

        // Audio output
        .add_plugins(bevy_kira_audio::AudioPlugin)

        // Our game plugin
        .add_plugins(sweepo::SweepoPlugin)

        .run();
}
