//! Audio plugin - plays cues through bevy_kira_audio.

use bevy::prelude::*;

use super::cues::{load_cues, play_collection_cues};

/// Plays a one-shot cue whenever garbage is collected.
///
/// Expects `bevy_kira_audio::AudioPlugin` to be added by the binary.
pub struct SweepoAudioPlugin;

impl Plugin for SweepoAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_cues)
            .add_systems(Update, play_collection_cues);
    }
}
