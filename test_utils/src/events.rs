//! Event sink that records every notification for later inspection.

use std::sync::{Arc, Mutex, PoisonError};

use lanehop::{DeathEffect, Lane, LaneKind, RunnerEvents};

/// One notification emitted by the runner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    /// `on_character_hidden`.
    CharacterHidden,
    /// `on_death_effects_requested`.
    DeathEffects(DeathEffect),
    /// `on_score_changed`.
    ScoreChanged(i32),
    /// `on_lane_spawned` with the lane index and kind.
    LaneSpawned(i32, LaneKind),
    /// `on_lane_evicted` with the lane index.
    LaneEvicted(i32),
}

/// Records notifications into a log shared with every clone.
///
/// Hand one clone to the runner and keep another to read the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingEvents {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingEvents {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, notification: Notification) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }

    /// Copy of every notification recorded so far, in order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Forgets every notification recorded so far.
    pub fn clear(&self) {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Death effects requested so far.
    #[must_use]
    pub fn death_effects(&self) -> Vec<DeathEffect> {
        self.snapshot()
            .into_iter()
            .filter_map(|n| match n {
                Notification::DeathEffects(effect) => Some(effect),
                _ => None,
            })
            .collect()
    }

    /// Scores reported so far.
    #[must_use]
    pub fn scores(&self) -> Vec<i32> {
        self.snapshot()
            .into_iter()
            .filter_map(|n| match n {
                Notification::ScoreChanged(score) => Some(score),
                _ => None,
            })
            .collect()
    }

    /// Number of times the character was hidden.
    #[must_use]
    pub fn hides(&self) -> usize {
        self.snapshot()
            .iter()
            .filter(|n| matches!(n, Notification::CharacterHidden))
            .count()
    }
}

impl RunnerEvents for RecordingEvents {
    fn on_character_hidden(&mut self) {
        self.record(Notification::CharacterHidden);
    }

    fn on_death_effects_requested(&mut self, effect: DeathEffect) {
        self.record(Notification::DeathEffects(effect));
    }

    fn on_score_changed(&mut self, score: i32) {
        self.record(Notification::ScoreChanged(score));
    }

    fn on_lane_spawned(&mut self, lane: &Lane) {
        self.record(Notification::LaneSpawned(lane.y, lane.kind));
    }

    fn on_lane_evicted(&mut self, lane: &Lane) {
        self.record(Notification::LaneEvicted(lane.y));
    }
}
