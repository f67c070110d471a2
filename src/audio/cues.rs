use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioSource as CueSource};

use crate::core::{AudioTuning, GameplayConfig, GarbageCollected, GarbageKind};

/// Loaded handles for the collection cues.
#[derive(Resource)]
pub struct CueHandles {
    pub bag_collected: Handle<CueSource>,
    pub rubbish_cleaned: Handle<CueSource>,
}

/// Asset path of the cue played for a kind of garbage.
pub fn cue_path(kind: GarbageKind, tuning: &AudioTuning) -> &str {
    match kind {
        GarbageKind::Bag => &tuning.bag_collected,
        GarbageKind::Rubbish => &tuning.rubbish_cleaned,
    }
}

pub(super) fn load_cues(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameplayConfig>,
) {
    let tuning = &config.audio;
    commands.insert_resource(CueHandles {
        bag_collected: asset_server.load(cue_path(GarbageKind::Bag, tuning).to_string()),
        rubbish_cleaned: asset_server.load(cue_path(GarbageKind::Rubbish, tuning).to_string()),
    });
    debug!(
        "Loading audio cues '{}' and '{}'",
        tuning.bag_collected, tuning.rubbish_cleaned
    );
}

pub(super) fn play_collection_cues(
    mut collected: EventReader<GarbageCollected>,
    cues: Option<Res<CueHandles>>,
    config: Res<GameplayConfig>,
    audio: Res<Audio>,
) {
    let Some(cues) = cues else {
        collected.clear();
        return;
    };
    for event in collected.read() {
        let handle = match event.kind {
            GarbageKind::Bag => &cues.bag_collected,
            GarbageKind::Rubbish => &cues.rubbish_cleaned,
        };
        audio.play(handle.clone()).with_volume(config.audio.volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_kind_has_its_own_cue() {
        let tuning = AudioTuning::default();
        assert_eq!(cue_path(GarbageKind::Bag, &tuning), "sounds/bag_collected.ogg");
        assert_eq!(
            cue_path(GarbageKind::Rubbish, &tuning),
            "sounds/rubbish_cleaned.ogg"
        );
    }
}
