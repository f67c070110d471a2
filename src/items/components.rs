//! Garbage item components.

use bevy::prelude::*;

/// Category tag: the player can pick this up and it can go in the dumpster.
#[derive(Component, Debug, Default)]
pub struct Pickable;

/// Category tag: the sweeper brushes can clean this up.
#[derive(Component, Debug, Default)]
pub struct Cleanable;

/// Collection state of a pickable item.
///
/// `is_collected` flips to true exactly once, when a collector accepts the
/// item. Collectors must check it first so an item is never counted twice.
#[derive(Component, Debug, Default)]
pub struct PickableItem {
    pub is_collected: bool,
}

impl PickableItem {
    /// Mark the item collected. Returns false if it already was.
    pub fn mark_collected(&mut self) -> bool {
        if self.is_collected {
            return false;
        }
        self.is_collected = true;
        true
    }
}
