//! Brush cleaning: rubbish touched by spinning brushes is swept up after a
//! short delay.

use std::time::Duration;

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use crate::core::{zone_contact, GameplayConfig, GarbageCollected, GarbageKind};
use crate::items::Cleanable;
use crate::scoring::ScoreTracker;

use super::components::{CleaningZone, Sweeper};

#[derive(Debug)]
struct PendingCleanup {
    target: Entity,
    timer: Timer,
}

/// Deferred removals of swept rubbish.
///
/// Entries only hold the target id; whoever drains the queue must check the
/// entity still exists.
#[derive(Resource, Debug, Default)]
pub struct CleanupQueue {
    pending: Vec<PendingCleanup>,
}

impl CleanupQueue {
    /// Queue `target` for removal after `delay` seconds.
    ///
    /// Returns false if it is already queued.
    pub fn schedule(&mut self, target: Entity, delay: f32) -> bool {
        if self.is_pending(target) {
            return false;
        }
        self.pending.push(PendingCleanup {
            target,
            timer: Timer::from_seconds(delay, TimerMode::Once),
        });
        true
    }

    pub fn is_pending(&self, target: Entity) -> bool {
        self.pending.iter().any(|p| p.target == target)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Advance all timers and take the targets whose delay has elapsed.
    pub fn tick(&mut self, delta: Duration) -> Vec<Entity> {
        let mut due = Vec::new();
        self.pending.retain_mut(|p| {
            p.timer.tick(delta);
            if p.timer.finished() {
                due.push(p.target);
                false
            } else {
                true
            }
        });
        due
    }
}

/// Queue rubbish that enters a cleaning zone while its brushes spin.
pub fn brush_contacts(
    mut collisions: EventReader<CollisionEvent>,
    zones: Query<&CleaningZone>,
    sweepers: Query<&Sweeper>,
    cleanables: Query<(), With<Cleanable>>,
    config: Res<GameplayConfig>,
    mut queue: ResMut<CleanupQueue>,
) {
    for event in collisions.read() {
        let Some((zone, other)) = zone_contact(event, |e| zones.contains(e)) else {
            continue;
        };
        if !cleanables.contains(other) {
            continue;
        }
        let Ok(zone) = zones.get(zone) else {
            continue;
        };
        let Ok(sweeper) = sweepers.get(zone.sweeper) else {
            continue;
        };
        if !sweeper.brushes_rotating {
            continue;
        }
        if queue.schedule(other, config.vehicle.cleanup_delay) {
            debug!("Sweeping up {:?}", other);
        }
    }
}

/// Remove rubbish whose cleanup delay has elapsed and count it.
pub fn run_cleanups(
    mut commands: Commands,
    time: Res<Time>,
    mut queue: ResMut<CleanupQueue>,
    cleanables: Query<(), With<Cleanable>>,
    mut tracker: Option<ResMut<ScoreTracker>>,
    mut collected: EventWriter<GarbageCollected>,
) {
    for target in queue.tick(time.delta()) {
        if !cleanables.contains(target) {
            debug!("Rubbish {:?} vanished before cleanup", target);
            continue;
        }
        if let Some(tracker) = tracker.as_mut() {
            tracker.collect_floor_rubbish();
            info!(
                "Rubbish cleaned ({}/{})",
                tracker.collected_rubbish(),
                tracker.total_rubbish()
            );
        }
        collected.send(GarbageCollected {
            kind: GarbageKind::Rubbish,
        });
        commands.entity(target).despawn_recursive();
    }
}

/// Drop pending cleanups when the level is torn down.
pub fn clear_cleanups(mut queue: ResMut<CleanupQueue>) {
    queue.clear();
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)));
        app.insert_resource(GameplayConfig::default());
        app.insert_resource(ScoreTracker::new(3, 8, 60.0));
        app.init_resource::<CleanupQueue>();
        app.add_event::<CollisionEvent>();
        app.add_event::<GarbageCollected>();
        app.add_systems(Update, (brush_contacts, run_cleanups).chain());
        app
    }

    fn spawn_sweeper(app: &mut App, brushes_rotating: bool) -> Entity {
        let sweeper = app
            .world_mut()
            .spawn(Sweeper {
                brushes_rotating,
                ..default()
            })
            .id();
        app.world_mut().spawn(CleaningZone { sweeper }).id()
    }

    fn spawn_rubbish(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((Cleanable, GlobalTransform::default()))
            .id()
    }

    fn touch(app: &mut App, zone: Entity, rubbish: Entity) {
        app.world_mut().send_event(CollisionEvent::Started(
            zone,
            rubbish,
            CollisionEventFlags::SENSOR,
        ));
    }

    #[test]
    fn queue_does_not_double_schedule() {
        let mut queue = CleanupQueue::default();
        let target = Entity::from_raw(9);
        assert!(queue.schedule(target, 1.0));
        assert!(!queue.schedule(target, 1.0));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn queue_releases_after_delay() {
        let mut queue = CleanupQueue::default();
        let target = Entity::from_raw(9);
        queue.schedule(target, 1.0);
        assert!(queue.tick(Duration::from_millis(600)).is_empty());
        assert_eq!(queue.tick(Duration::from_millis(600)), vec![target]);
        assert!(queue.is_empty());
    }

    #[test]
    fn spinning_brushes_clean_after_delay() {
        let mut app = test_app();
        let zone = spawn_sweeper(&mut app, true);
        let rubbish = spawn_rubbish(&mut app);

        touch(&mut app, zone, rubbish);
        app.update();
        // Not yet: the cleanup waits a full second
        assert!(app.world().entities().contains(rubbish));
        assert_eq!(app.world().resource::<ScoreTracker>().collected_rubbish(), 0);

        for _ in 0..6 {
            app.update();
        }
        assert!(!app.world().entities().contains(rubbish));
        assert_eq!(app.world().resource::<ScoreTracker>().collected_rubbish(), 1);
    }

    #[test]
    fn idle_brushes_ignore_rubbish() {
        let mut app = test_app();
        let zone = spawn_sweeper(&mut app, false);
        let rubbish = spawn_rubbish(&mut app);

        touch(&mut app, zone, rubbish);
        app.update();

        assert!(app.world().resource::<CleanupQueue>().is_empty());
    }

    #[test]
    fn vanished_rubbish_is_a_no_op() {
        let mut app = test_app();
        let zone = spawn_sweeper(&mut app, true);
        let rubbish = spawn_rubbish(&mut app);

        touch(&mut app, zone, rubbish);
        app.update();
        app.world_mut().despawn(rubbish);
        for _ in 0..6 {
            app.update();
        }

        assert_eq!(app.world().resource::<ScoreTracker>().collected_rubbish(), 0);
        assert!(app.world().resource::<CleanupQueue>().is_empty());
    }

    #[test]
    fn repeated_contacts_count_once() {
        let mut app = test_app();
        let zone = spawn_sweeper(&mut app, true);
        let rubbish = spawn_rubbish(&mut app);

        touch(&mut app, zone, rubbish);
        touch(&mut app, zone, rubbish);
        app.update();
        touch(&mut app, zone, rubbish);
        for _ in 0..6 {
            app.update();
        }

        assert_eq!(app.world().resource::<ScoreTracker>().collected_rubbish(), 1);
    }
}
