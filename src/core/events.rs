//! Global events used for cross-system communication.
//!
//! Collectors (the dumpster, the sweeper brushes) mutate the score tracker
//! directly; these events carry the consequences to systems that only need
//! to react, such as the HUD, audio and the win/lose presentation.

use bevy::prelude::*;

/// Result of a cleanup session.
///
/// `Playing` is the only non-terminal value. Once `Won` or `Lost` is reached
/// the tracker ignores all further collections and timer ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    #[default]
    Playing,
    Won,
    Lost,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Playing)
    }
}

/// Kinds of garbage the tracker counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GarbageKind {
    /// A bag carried by the player and dropped into the dumpster.
    Bag,
    /// Floor rubbish swept up by the sweeper brushes.
    Rubbish,
}

/// Sent once when the session leaves `Outcome::Playing`.
///
/// Observers freeze the virtual clock, release the cursor and show the
/// matching panel.
#[derive(Event, Debug, Clone, Copy)]
pub struct OutcomeReached {
    pub outcome: Outcome,
}

/// Sent whenever a piece of garbage has been accepted by a collector.
#[derive(Event, Debug, Clone, Copy)]
pub struct GarbageCollected {
    pub kind: GarbageKind,
}

/// Request to reset the session and rebuild the level.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct RestartRequested;

/// Request to close the application.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ExitRequested;
