//! Audio module - one-shot cues for collected garbage.

mod cues;
mod plugin;

pub use cues::{cue_path, CueHandles};
pub use plugin::SweepoAudioPlugin;
