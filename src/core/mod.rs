//! Core game module - states, events, config and fundamental systems.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod contacts;
mod error;
mod events;
mod plugin;
mod states;

pub use config::*;
pub use contacts::{contact_started, zone_contact};
pub use error::ConfigError;
pub use events::*;
pub use plugin::{release_cursor, CorePlugin};
pub use states::*;
