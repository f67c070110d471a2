//! Garbage score tracker - counts, countdown and win/lose rules.

use bevy::prelude::*;

use crate::core::{Outcome, ScoreConfig};

/// Session score state.
///
/// One instance exists per session: it is inserted when a level is built and
/// removed when the level is torn down. Collectors never touch the fields,
/// they call `collect_bag` / `collect_floor_rubbish`.
#[derive(Resource, Debug, Clone)]
pub struct ScoreTracker {
    collected_bags: u32,
    total_bags: u32,
    collected_rubbish: u32,
    total_rubbish: u32,
    time_left: f32,
    outcome: Outcome,
}

impl ScoreTracker {
    pub fn new(total_bags: u32, total_rubbish: u32, time_limit: f32) -> Self {
        Self {
            collected_bags: 0,
            total_bags,
            collected_rubbish: 0,
            total_rubbish,
            time_left: time_limit.max(0.0),
            outcome: Outcome::Playing,
        }
    }

    pub fn from_config(config: &ScoreConfig) -> Self {
        Self::new(config.total_bags, config.total_rubbish, config.time_limit)
    }

    pub fn collected_bags(&self) -> u32 {
        self.collected_bags
    }

    pub fn total_bags(&self) -> u32 {
        self.total_bags
    }

    pub fn collected_rubbish(&self) -> u32 {
        self.collected_rubbish
    }

    pub fn total_rubbish(&self) -> u32 {
        self.total_rubbish
    }

    pub fn time_left(&self) -> f32 {
        self.time_left
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Count one bag. Returns the outcome if this collection ended the session.
    ///
    /// Counts keep going past the total; only the win check cares.
    pub fn collect_bag(&mut self) -> Option<Outcome> {
        if self.outcome.is_terminal() {
            return None;
        }
        self.collected_bags += 1;
        self.evaluate_win()
    }

    /// Count one piece of floor rubbish.
    pub fn collect_floor_rubbish(&mut self) -> Option<Outcome> {
        if self.outcome.is_terminal() {
            return None;
        }
        self.collected_rubbish += 1;
        self.evaluate_win()
    }

    /// Advance the countdown. Returns `Some(Outcome::Lost)` on the tick the
    /// timer runs out.
    pub fn tick(&mut self, delta_secs: f32) -> Option<Outcome> {
        if self.outcome.is_terminal() {
            return None;
        }
        self.time_left = (self.time_left - delta_secs).max(0.0);
        if self.time_left <= 0.0 {
            self.outcome = Outcome::Lost;
            return Some(Outcome::Lost);
        }
        None
    }

    /// Switch to `Won` when both targets are met.
    pub fn evaluate_win(&mut self) -> Option<Outcome> {
        if self.outcome.is_terminal() {
            return None;
        }
        if self.collected_bags >= self.total_bags && self.collected_rubbish >= self.total_rubbish {
            self.outcome = Outcome::Won;
            return Some(Outcome::Won);
        }
        None
    }

    pub fn bags_text(&self) -> String {
        format!("Garbage Bags: {}/{}", self.collected_bags, self.total_bags)
    }

    pub fn rubbish_text(&self) -> String {
        format!("Floor Rubbish: {}/{}", self.collected_rubbish, self.total_rubbish)
    }

    /// Remaining time as `mm:ss`, empty once the session is lost.
    pub fn timer_text(&self) -> String {
        if self.outcome == Outcome::Lost {
            return String::new();
        }
        let minutes = (self.time_left / 60.0).floor() as u32;
        let seconds = (self.time_left % 60.0).floor() as u32;
        format!("{:02}:{:02}", minutes, seconds)
    }
}
