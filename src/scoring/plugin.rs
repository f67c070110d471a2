//! Scoring plugin - session lifecycle, countdown and outcome side effects.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::{
    release_cursor, ExitRequested, GameState, GameplayConfig, Outcome, OutcomeReached,
    RestartRequested,
};

use super::tracker::ScoreTracker;

/// Scoring plugin - owns the `ScoreTracker` lifecycle.
pub struct ScoringPlugin;

impl Plugin for ScoringPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), start_session)
            .add_systems(OnExit(GameState::InGame), end_session)
            .add_systems(
                Update,
                (tick_countdown, announce_outcome, freeze_on_outcome)
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )
            .add_systems(Update, (handle_restart, handle_exit));
    }
}

/// Create a fresh tracker for the new session.
pub fn start_session(mut commands: Commands, config: Res<GameplayConfig>) {
    let tracker = ScoreTracker::from_config(&config.score);
    info!(
        "Session started: {} bags, {} rubbish, {:.0}s",
        tracker.total_bags(),
        tracker.total_rubbish(),
        tracker.time_left()
    );
    commands.insert_resource(tracker);
}

fn end_session(mut commands: Commands) {
    commands.remove_resource::<ScoreTracker>();
}

/// Run the countdown on virtual time.
pub fn tick_countdown(time: Res<Time>, tracker: Option<ResMut<ScoreTracker>>) {
    let Some(mut tracker) = tracker else {
        return;
    };
    if tracker.tick(time.delta_secs()) == Some(Outcome::Lost) {
        info!("Time is up");
    }
}

/// Send `OutcomeReached` the first time the tracker leaves `Playing`,
/// whichever collector caused it.
pub fn announce_outcome(
    tracker: Option<Res<ScoreTracker>>,
    mut last_seen: Local<Outcome>,
    mut outcome_events: EventWriter<OutcomeReached>,
) {
    let Some(tracker) = tracker else {
        *last_seen = Outcome::Playing;
        return;
    };
    let outcome = tracker.outcome();
    if outcome == *last_seen {
        return;
    }
    if outcome.is_terminal() {
        info!("Session over: {:?}", outcome);
        outcome_events.send(OutcomeReached { outcome });
    }
    *last_seen = outcome;
}

/// Freeze the simulation clock and hand the cursor back.
pub fn freeze_on_outcome(
    mut outcome_events: EventReader<OutcomeReached>,
    mut time: ResMut<Time<Virtual>>,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
) {
    if outcome_events.read().last().is_none() {
        return;
    }
    time.pause();
    release_cursor(&mut window_query);
}

/// Unfreeze and rebuild the level through the Loading state.
pub fn handle_restart(
    mut restart_events: EventReader<RestartRequested>,
    mut time: ResMut<Time<Virtual>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if restart_events.read().last().is_none() {
        return;
    }
    info!("Restarting session");
    time.unpause();
    next_state.set(GameState::Loading);
}

fn handle_exit(mut exit_events: EventReader<ExitRequested>, mut exit: EventWriter<AppExit>) {
    if exit_events.read().last().is_some() {
        exit.send(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;
    use std::time::Duration;

    use crate::core::CorePlugin;

    fn test_app(time_limit: f32) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);
        let mut config = GameplayConfig::default();
        config.score.total_bags = 2;
        config.score.total_rubbish = 1;
        config.score.time_limit = time_limit;
        app.insert_resource(config);
        app.add_plugins((CorePlugin, ScoringPlugin));
        // Drive virtual time by hand
        app.insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
            Duration::from_millis(20),
        ));
        // Loading -> InGame takes two updates
        app.update();
        app.update();
        app
    }

    fn outcomes(app: &App) -> Vec<Outcome> {
        let events = app.world().resource::<Events<OutcomeReached>>();
        let mut cursor = events.get_cursor();
        cursor.read(events).map(|e| e.outcome).collect()
    }

    #[test]
    fn session_starts_with_configured_tracker() {
        let app = test_app(60.0);
        assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::InGame);
        let tracker = app.world().resource::<ScoreTracker>();
        assert_eq!(tracker.total_bags(), 2);
        assert_eq!(tracker.total_rubbish(), 1);
        assert_eq!(tracker.outcome(), Outcome::Playing);
    }

    #[test]
    fn running_out_of_time_loses_and_freezes_clock() {
        let mut app = test_app(0.05);
        for _ in 0..10 {
            app.update();
            if app.world().resource::<ScoreTracker>().outcome() != Outcome::Playing {
                break;
            }
        }
        let tracker = app.world().resource::<ScoreTracker>();
        assert_eq!(tracker.outcome(), Outcome::Lost);
        assert_eq!(tracker.time_left(), 0.0);
        assert!(app.world().resource::<Time<Virtual>>().is_paused());
        assert_eq!(outcomes(&app), vec![Outcome::Lost]);
    }

    #[test]
    fn win_from_collections_is_announced_once() {
        let mut app = test_app(60.0);
        {
            let mut tracker = app.world_mut().resource_mut::<ScoreTracker>();
            tracker.collect_bag();
            tracker.collect_bag();
            tracker.collect_floor_rubbish();
        }
        app.update();
        app.update();
        assert_eq!(outcomes(&app), vec![Outcome::Won]);
        assert!(app.world().resource::<Time<Virtual>>().is_paused());
    }

    #[test]
    fn restart_resets_the_tracker() {
        let mut app = test_app(60.0);
        app.world_mut().resource_mut::<ScoreTracker>().collect_bag();
        app.world_mut().send_event(RestartRequested);
        // Restart -> Loading -> InGame
        for _ in 0..4 {
            app.update();
        }
        assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::InGame);
        assert_eq!(app.world().resource::<ScoreTracker>().collected_bags(), 0);
        assert!(!app.world().resource::<Time<Virtual>>().is_paused());
    }
}
