//! Items module - pickable garbage, cleanable rubbish and the dumpster.

mod components;
mod dumpster;
mod plugin;

pub use components::*;
pub use dumpster::{accept_bag, collect_into_dumpster, Dumpster};
pub use plugin::ItemsPlugin;
