//! In-game HUD - collection counts, countdown and controls.

use bevy::prelude::*;

use crate::core::GameState;
use crate::scoring::ScoreTracker;

/// Marker for HUD root entities.
#[derive(Component)]
pub struct HudRoot;

/// Which tracker value a HUD line shows.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudText {
    Bags,
    Rubbish,
    Timer,
}

impl HudText {
    pub fn render(&self, tracker: &ScoreTracker) -> String {
        match self {
            HudText::Bags => tracker.bags_text(),
            HudText::Rubbish => tracker.rubbish_text(),
            HudText::Timer => tracker.timer_text(),
        }
    }
}

const CONTROLS: &str =
    "WASD move | Shift run | Space jump / brake | E pick up / drop | F enter / exit | T brushes";

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            update_hud_texts.run_if(in_state(GameState::InGame)),
        );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    // Score column (top-left corner)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            spawn_line(parent, HudText::Timer, 32.0);
            spawn_line(parent, HudText::Bags, 20.0);
            spawn_line(parent, HudText::Rubbish, 20.0);
        });

    // Controls hint (bottom centre)
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::End,
                padding: UiRect::bottom(Val::Px(12.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(CONTROLS),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgba(1.0, 1.0, 1.0, 0.6)),
            ));
        });
}

fn spawn_line(parent: &mut ChildBuilder, line: HudText, font_size: f32) {
    parent.spawn((
        Text::new(""),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.95, 0.9)),
        Node {
            margin: UiRect::bottom(Val::Px(6.0)),
            ..default()
        },
        line,
    ));
}

/// Refresh HUD lines when the tracker changes.
fn update_hud_texts(
    tracker: Option<Res<ScoreTracker>>,
    mut lines: Query<(&HudText, &mut Text)>,
) {
    let Some(tracker) = tracker else {
        return;
    };
    if !tracker.is_changed() {
        return;
    }
    for (line, mut text) in lines.iter_mut() {
        let rendered = line.render(&tracker);
        if text.0 != rendered {
            text.0 = rendered;
        }
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_render_tracker_values() {
        let mut tracker = ScoreTracker::new(3, 8, 90.0);
        tracker.collect_bag();
        assert_eq!(HudText::Bags.render(&tracker), "Garbage Bags: 1/3");
        assert_eq!(HudText::Rubbish.render(&tracker), "Floor Rubbish: 0/8");
        assert_eq!(HudText::Timer.render(&tracker), "01:30");
    }
}
