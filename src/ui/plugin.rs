//! UI plugin - HUD and the end-of-session panels.

use bevy::prelude::*;

use crate::core::{ExitRequested, GameState, Outcome, OutcomeReached, RestartRequested};
use super::hud;

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app
            // Win/lose panel
            .add_systems(
                Update,
                (show_outcome_panel, outcome_panel_input).run_if(in_state(GameState::InGame)),
            )
            .add_systems(OnExit(GameState::InGame), cleanup_outcome_panel);
    }
}

/// Marker for win/lose panel entities.
#[derive(Component)]
struct OutcomePanel;

/// Marker for panel buttons.
#[derive(Component)]
enum PanelButton {
    Restart,
    Exit,
}

/// Title, subtitle and tint for an outcome.
fn panel_copy(outcome: Outcome) -> Option<(&'static str, &'static str, Color)> {
    match outcome {
        Outcome::Won => Some((
            "STREETS CLEAN!",
            "Every bag binned and every scrap swept.",
            Color::srgb(0.3, 0.85, 0.4),
        )),
        Outcome::Lost => Some((
            "TIME'S UP",
            "The garbage won this round.",
            Color::srgb(0.85, 0.25, 0.2),
        )),
        Outcome::Playing => None,
    }
}

/// Show the win or lose panel when the session ends.
fn show_outcome_panel(mut commands: Commands, mut outcome_events: EventReader<OutcomeReached>) {
    let Some(event) = outcome_events.read().last() else {
        return;
    };
    let Some((title, subtitle, color)) = panel_copy(event.outcome) else {
        return;
    };

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                position_type: PositionType::Absolute,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            OutcomePanel,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(color),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new(subtitle),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            spawn_panel_button(parent, "Restart", PanelButton::Restart);
            spawn_panel_button(parent, "Exit", PanelButton::Exit);
        });
}

/// Helper to spawn a panel button.
fn spawn_panel_button(parent: &mut ChildBuilder, text: &str, button: PanelButton) {
    parent
        .spawn((
            Button,
            Node {
                width: Val::Px(200.0),
                height: Val::Px(50.0),
                margin: UiRect::all(Val::Px(10.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.15, 0.15, 0.2)),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(text),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.85)),
            ));
        });
}

/// Handle panel button interactions.
fn outcome_panel_input(
    mut interaction_query: Query<
        (&Interaction, &PanelButton, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
    mut restart: EventWriter<RestartRequested>,
    mut exit: EventWriter<ExitRequested>,
) {
    for (interaction, button, mut bg_color) in interaction_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                *bg_color = Color::srgb(0.3, 0.3, 0.35).into();
                match button {
                    PanelButton::Restart => {
                        restart.send(RestartRequested);
                    }
                    PanelButton::Exit => {
                        exit.send(ExitRequested);
                    }
                }
            }
            Interaction::Hovered => {
                *bg_color = Color::srgb(0.25, 0.25, 0.3).into();
            }
            Interaction::None => {
                *bg_color = Color::srgb(0.15, 0.15, 0.2).into();
            }
        }
    }
}

/// Clean up panel entities.
fn cleanup_outcome_panel(mut commands: Commands, query: Query<Entity, With<OutcomePanel>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
