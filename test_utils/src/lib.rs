//! Utility helpers for tests.
//!
//! Deterministic collaborators for [`lanehop::LaneRunner`] that record what
//! the runner asked of them, plus builders for common setups.

pub mod events;
pub mod terrain;

pub use events::{Notification, RecordingEvents};
pub use terrain::{FixedObstacles, OpenField, TrackingHost};

use lanehop::{Direction, LaneRunner, MoveOutcome, ObstaclePlacer, RunnerConfig};

/// Default configuration with a fixed seed.
#[must_use]
pub fn seeded_config(seed: u64) -> RunnerConfig {
    RunnerConfig {
        seed: Some(seed),
        ..RunnerConfig::default()
    }
}

/// A runner wired to recording collaborators.
#[derive(Debug)]
pub struct Harness {
    /// The runner under test.
    pub runner: LaneRunner,
    /// Clone of the event sink handed to the runner.
    pub events: RecordingEvents,
    /// Clone of the host handed to the runner.
    pub host: TrackingHost,
}

impl Harness {
    /// Builds a harness around `placer`.
    ///
    /// # Panics
    /// Panics if `config` is invalid.
    #[must_use]
    pub fn new(config: RunnerConfig, placer: impl ObstaclePlacer + 'static) -> Self {
        let events = RecordingEvents::new();
        let host = TrackingHost::new();
        let runner = LaneRunner::new(
            config,
            Box::new(host.clone()),
            Box::new(placer),
            Box::new(events.clone()),
        )
        .unwrap_or_else(|e| panic!("test configuration rejected: {e}"));
        Self {
            runner,
            events,
            host,
        }
    }

    /// Harness over obstacle-free terrain with the default configuration.
    #[must_use]
    pub fn open(seed: u64) -> Self {
        Self::new(seeded_config(seed), OpenField)
    }

    /// Attempts a move and, if accepted, ticks until the hop lands.
    ///
    /// # Panics
    /// Panics if the runner reports a terrain consistency error.
    pub fn hop(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self
            .runner
            .try_move(direction)
            .unwrap_or_else(|e| panic!("terrain consistency error: {e}"));
        let duration = self.runner.config().move_duration;
        self.runner.tick(duration, duration);
        outcome
    }

    /// Hops `count` times in `direction`.
    pub fn hop_n(&mut self, direction: Direction, count: usize) {
        for _ in 0..count {
            self.hop(direction);
        }
    }
}
