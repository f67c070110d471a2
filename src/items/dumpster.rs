//! Dumpster zone - accepts dropped garbage bags.

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use crate::core::{zone_contact, GarbageCollected, GarbageKind};
use crate::scoring::ScoreTracker;

use super::components::{Pickable, PickableItem};

/// Marker for the dumpster's trigger volume.
#[derive(Component, Debug, Default)]
pub struct Dumpster;

/// Decide whether an item entering the dumpster counts.
///
/// Only free (not carried) items that were not collected before are taken.
/// On acceptance the item is marked and the bag is counted.
pub fn accept_bag(item: &mut PickableItem, is_held: bool, tracker: &mut ScoreTracker) -> bool {
    if is_held || !item.mark_collected() {
        return false;
    }
    tracker.collect_bag();
    true
}

/// Collect pickable items that enter a dumpster trigger.
pub fn collect_into_dumpster(
    mut commands: Commands,
    mut collisions: EventReader<CollisionEvent>,
    dumpsters: Query<(), With<Dumpster>>,
    mut items: Query<(&mut PickableItem, Option<&Parent>), With<Pickable>>,
    tracker: Option<ResMut<ScoreTracker>>,
    mut collected: EventWriter<GarbageCollected>,
) {
    let Some(mut tracker) = tracker else {
        if !collisions.is_empty() {
            debug!("No score tracker, dumpster ignores contacts");
        }
        collisions.clear();
        return;
    };

    for event in collisions.read() {
        let Some((_, other)) = zone_contact(event, |e| dumpsters.contains(e)) else {
            continue;
        };
        let Ok((mut item, parent)) = items.get_mut(other) else {
            continue;
        };
        if !accept_bag(&mut item, parent.is_some(), &mut tracker) {
            continue;
        }

        info!(
            "Bag collected ({}/{})",
            tracker.collected_bags(),
            tracker.total_bags()
        );
        collected.send(GarbageCollected {
            kind: GarbageKind::Bag,
        });
        commands.entity(other).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_event::<CollisionEvent>();
        app.add_event::<GarbageCollected>();
        app.insert_resource(ScoreTracker::new(2, 1, 60.0));
        app.add_systems(Update, collect_into_dumpster);
        app
    }

    fn spawn_bag(app: &mut App) -> Entity {
        app.world_mut()
            .spawn((Pickable, PickableItem::default(), GlobalTransform::default()))
            .id()
    }

    fn enter(app: &mut App, zone: Entity, item: Entity) {
        app.world_mut().send_event(CollisionEvent::Started(
            item,
            zone,
            CollisionEventFlags::SENSOR,
        ));
    }

    #[test]
    fn accept_bag_counts_once() {
        let mut tracker = ScoreTracker::new(2, 1, 60.0);
        let mut item = PickableItem::default();
        assert!(accept_bag(&mut item, false, &mut tracker));
        assert!(!accept_bag(&mut item, false, &mut tracker));
        assert_eq!(tracker.collected_bags(), 1);
    }

    #[test]
    fn held_items_are_refused() {
        let mut tracker = ScoreTracker::new(2, 1, 60.0);
        let mut item = PickableItem::default();
        assert!(!accept_bag(&mut item, true, &mut tracker));
        assert!(!item.is_collected);
        assert_eq!(tracker.collected_bags(), 0);
    }

    #[test]
    fn dropped_bag_is_collected_and_despawned() {
        let mut app = test_app();
        let dumpster = app.world_mut().spawn(Dumpster).id();
        let bag = spawn_bag(&mut app);

        enter(&mut app, dumpster, bag);
        app.update();

        assert_eq!(app.world().resource::<ScoreTracker>().collected_bags(), 1);
        assert!(!app.world().entities().contains(bag));
        let kinds: Vec<_> = app
            .world()
            .resource::<Events<GarbageCollected>>()
            .iter_current_update_events()
            .map(|event| event.kind)
            .collect();
        assert_eq!(kinds, vec![GarbageKind::Bag]);
    }

    #[test]
    fn duplicate_contacts_in_one_tick_count_once() {
        let mut app = test_app();
        let first = app.world_mut().spawn(Dumpster).id();
        let second = app.world_mut().spawn(Dumpster).id();
        let bag = spawn_bag(&mut app);

        enter(&mut app, first, bag);
        enter(&mut app, second, bag);
        app.update();

        assert_eq!(app.world().resource::<ScoreTracker>().collected_bags(), 1);
    }

    #[test]
    fn carried_bag_is_ignored() {
        let mut app = test_app();
        let dumpster = app.world_mut().spawn(Dumpster).id();
        let hand = app.world_mut().spawn_empty().id();
        let bag = spawn_bag(&mut app);
        app.world_mut().entity_mut(hand).add_child(bag);

        enter(&mut app, dumpster, bag);
        app.update();

        assert_eq!(app.world().resource::<ScoreTracker>().collected_bags(), 0);
        assert!(app.world().entities().contains(bag));
    }

    #[test]
    fn non_pickable_entities_are_ignored() {
        let mut app = test_app();
        let dumpster = app.world_mut().spawn(Dumpster).id();
        let crate_box = app.world_mut().spawn(PickableItem::default()).id();

        enter(&mut app, dumpster, crate_box);
        app.update();

        assert_eq!(app.world().resource::<ScoreTracker>().collected_bags(), 0);
    }

    #[test]
    fn missing_tracker_is_a_no_op() {
        let mut app = test_app();
        app.world_mut().remove_resource::<ScoreTracker>();
        let dumpster = app.world_mut().spawn(Dumpster).id();
        let bag = spawn_bag(&mut app);

        enter(&mut app, dumpster, bag);
        app.update();

        assert!(!app.world().get::<PickableItem>(bag).unwrap().is_collected);
    }
}
