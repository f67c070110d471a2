//! Scoring module - the session score tracker and win/lose flow.

mod plugin;
mod tracker;

pub use plugin::ScoringPlugin;
pub use tracker::ScoreTracker;
