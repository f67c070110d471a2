//! Game state definitions that control the overall flow of the game.
//!
//! There is no menu: the game boots straight into a session. `Loading` is
//! also the state we pass through when restarting, so leaving `InGame`
//! tears the level down and re-entering it builds a fresh one.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading`, immediately move to `InGame`
/// - `InGame` covers active play and the frozen win/lose screen
/// - Restart goes `InGame -> Loading -> InGame`
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state, and the transit state on restart
    #[default]
    Loading,
    /// A cleanup session is running (or has just ended)
    InGame,
}
