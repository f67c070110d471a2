//! Core plugin that sets up game states, events, config and cursor handling.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow, WindowFocused};

use super::config::GameplayConfig;
use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame)
/// - Global events (OutcomeReached, GarbageCollected, ...)
/// - The gameplay config resource
/// - Cursor capture while playing
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        // Tests and tools may provide their own config up front
        if !app.world().contains_resource::<GameplayConfig>() {
            app.insert_resource(GameplayConfig::load());
        }

        app
            .init_state::<GameState>()

            // Register global events
            .add_event::<OutcomeReached>()
            .add_event::<GarbageCollected>()
            .add_event::<RestartRequested>()
            .add_event::<ExitRequested>()
            // Normally registered by WindowPlugin; headless apps need it too
            .add_event::<WindowFocused>()

            // Nothing to load yet, so Loading is only a pass-through
            .add_systems(OnEnter(GameState::Loading), transition_to_in_game)

            .add_systems(OnEnter(GameState::InGame), grab_cursor)
            .add_systems(
                Update,
                follow_window_focus.run_if(in_state(GameState::InGame)),
            );
    }
}

/// Immediately transition from Loading to InGame.
fn transition_to_in_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Lock and hide the cursor for mouse-look.
pub fn grab_cursor(mut window_query: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::Locked;
        window.cursor_options.visible = false;
    }
}

/// Unlock and show the cursor so the player can click UI.
pub fn release_cursor(window_query: &mut Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = window_query.get_single_mut() {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

/// Lock the cursor while the window has focus, release it otherwise.
///
/// Once the session has ended the cursor stays free for the panel buttons.
fn follow_window_focus(
    mut focus_events: EventReader<WindowFocused>,
    time: Res<Time<Virtual>>,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
) {
    for event in focus_events.read() {
        let Ok(mut window) = window_query.get_mut(event.window) else {
            continue;
        };
        if event.focused && !time.is_paused() {
            window.cursor_options.grab_mode = CursorGrabMode::Locked;
            window.cursor_options.visible = false;
        } else {
            window.cursor_options.grab_mode = CursorGrabMode::None;
            window.cursor_options.visible = true;
        }
    }
}
