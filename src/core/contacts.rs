//! Helpers for reading rapier contact events.

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

/// The two entities of a contact that has just begun, in event order.
pub fn contact_started(event: &CollisionEvent) -> Option<(Entity, Entity)> {
    match event {
        CollisionEvent::Started(a, b, _) => Some((*a, *b)),
        CollisionEvent::Stopped(..) => None,
    }
}

/// Orders a started contact so the entity accepted by `is_zone` comes first.
///
/// Returns `None` when neither side is a zone.
pub fn zone_contact(
    event: &CollisionEvent,
    is_zone: impl Fn(Entity) -> bool,
) -> Option<(Entity, Entity)> {
    let (a, b) = contact_started(event)?;
    if is_zone(a) {
        Some((a, b))
    } else if is_zone(b) {
        Some((b, a))
    } else {
        None
    }
}
