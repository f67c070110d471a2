//! Sweepo - a small street-cleaning game in Bevy.
//!
//! Walk the block, carry garbage bags to the dumpster and drive the sweeper
//! over floor rubbish before the clock runs out.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, gameplay config
//! - **Scoring**: Session score tracker, countdown, win/lose flow
//! - **Items**: Pickable bags, cleanable rubbish, the dumpster
//! - **Player**: Locomotion state machine, pickup and vehicle entry
//! - **Vehicle**: Sweeper drive model, wheels, brushes and cleaning
//! - **Camera**: Follow rigs and priority switching
//! - **World**: Level building and teardown
//! - **UI**: HUD and win/lose panels
//! - **Audio**: Collection cues

pub mod audio;
pub mod camera;
pub mod core;
pub mod items;
pub mod player;
pub mod scoring;
pub mod ui;
pub mod vehicle;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Physics (`RapierPhysicsPlugin`) and audio output
/// (`bevy_kira_audio::AudioPlugin`) are added by the binary.
pub struct SweepoPlugin;

impl Plugin for SweepoPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Session rules
            .add_plugins(scoring::ScoringPlugin)
            .add_plugins(items::ItemsPlugin)

            // Actors
            .add_plugins(player::PlayerPlugin)
            .add_plugins(vehicle::VehiclePlugin)
            .add_plugins(camera::CameraPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // Presentation
            .add_plugins(ui::UiPlugin)
            .add_plugins(audio::SweepoAudioPlugin);
    }
}
