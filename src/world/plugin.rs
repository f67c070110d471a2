//! World plugin - level setup and teardown per session.

use bevy::prelude::*;

use crate::core::{GameState, GameplayConfig};

use super::level::{build_level, LevelEntity, LevelLayout};

/// World plugin - handles level building and cleanup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(OnExit(GameState::InGame), cleanup_level);
    }
}

/// Build the level for a new session.
pub fn setup_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<GameplayConfig>,
) {
    build_level(
        &mut commands,
        &mut meshes,
        &mut materials,
        &config,
        &LevelLayout::default(),
    );
}

/// Despawn every level root when leaving InGame state.
///
/// The player may be parented to the sweeper at this point, so only
/// parentless roots are despawned and their hierarchies go with them.
fn cleanup_level(
    mut commands: Commands,
    level_query: Query<Entity, (With<LevelEntity>, Without<Parent>)>,
) {
    let mut count = 0;
    for entity in level_query.iter() {
        commands.entity(entity).despawn_recursive();
        count += 1;
    }
    debug!("Level cleaned up ({} roots)", count);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_removes_roots_and_their_children() {
        let mut app = App::new();
        app.add_systems(Update, cleanup_level);

        let sweeper = app.world_mut().spawn(LevelEntity).id();
        // Player seated in the sweeper: still marked, but parented
        let player = app.world_mut().spawn(LevelEntity).set_parent(sweeper).id();
        let bag = app.world_mut().spawn(LevelEntity).id();
        let unrelated = app.world_mut().spawn_empty().id();

        app.update();

        let entities = app.world().entities();
        assert!(!entities.contains(sweeper));
        assert!(!entities.contains(player));
        assert!(!entities.contains(bag));
        assert!(entities.contains(unrelated));
    }
}
