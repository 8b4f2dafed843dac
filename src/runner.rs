//! The lane runner: composition root of the simulation core.
//!
//! [`LaneRunner`] owns every subsystem and sequences them. An accepted move
//! updates the camera accumulator and the score, extends the terrain window,
//! and finally checks whether the character has fallen too far behind.
//! Deaths, whether from a collision reported by the host or from falling
//! behind, go through a single path and fire their notifications exactly once.

use glam::Vec3;
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::camera::CameraTracker;
use crate::config::{ConfigError, RunnerConfig};
use crate::events::{DeathEffect, LogEvents, RunnerEvents};
use crate::grid::Direction;
use crate::movement::{Character, MoveOutcome, MoveState, MovementStateMachine};
use crate::scoring::{fall_behind_contact, ScoreMonitor};
use crate::terrain::{
    DetachedHost, ObstaclePlacer, ScatteredObstacles, TerrainError, TerrainHost, TerrainStreamer,
};

/// ChaCha stream reserved for camera shake so it never perturbs lane
/// generation.
const SHAKE_STREAM: u64 = 1;

/// Why the character died.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// The host reported contact with a vehicle or other hazard.
    Collision,
    /// The character retreated too far behind its best lane.
    FellBehind,
}

/// One simulated lane-runner session.
pub struct LaneRunner {
    config: RunnerConfig,
    seed: u64,
    terrain: TerrainStreamer,
    movement: MovementStateMachine,
    scoring: ScoreMonitor,
    camera: CameraTracker,
    events: Box<dyn RunnerEvents>,
    last_death: Option<DeathCause>,
}

impl std::fmt::Debug for LaneRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LaneRunner")
            .field("seed", &self.seed)
            .field("character", self.movement.character())
            .field("score", &self.scoring.score())
            .field("terrain", &self.terrain)
            .finish_non_exhaustive()
    }
}

impl LaneRunner {
    /// Builds a runner with injected collaborators and starts the first run.
    ///
    /// The configured seed drives both lane generation and camera shake; when
    /// absent a fresh seed is drawn.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn new(
        config: RunnerConfig,
        host: Box<dyn TerrainHost>,
        placer: Box<dyn ObstaclePlacer>,
        events: Box<dyn RunnerEvents>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let terrain_rng = ChaCha8Rng::seed_from_u64(seed);
        let mut shake_rng = ChaCha8Rng::seed_from_u64(seed);
        shake_rng.set_stream(SHAKE_STREAM);

        let movement = MovementStateMachine::new(config.move_duration);
        let camera = CameraTracker::from_config(
            &config,
            shake_rng,
            movement.character().world_position,
        );
        let terrain = TerrainStreamer::new(config.spawn_distance, host, placer, terrain_rng);

        let mut runner = Self {
            config,
            seed,
            terrain,
            movement,
            scoring: ScoreMonitor::new(),
            camera,
            events,
            last_death: None,
        };
        info!("lane runner seeded with {seed}");
        runner.reset();
        Ok(runner)
    }

    /// Builds a runner with detached lane handles, scattered obstacles and
    /// logged notifications.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails validation.
    pub fn headless(config: RunnerConfig) -> Result<Self, ConfigError> {
        let placer = ScatteredObstacles::new(config.obstacle_density);
        Self::new(
            config,
            Box::new(DetachedHost::default()),
            Box::new(placer),
            Box::new(LogEvents),
        )
    }

    /// Configuration the runner was built with.
    #[must_use]
    pub const fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Seed driving lane generation and shake.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Current character state.
    #[must_use]
    pub const fn character(&self) -> &Character {
        self.movement.character()
    }

    /// Current movement phase.
    #[must_use]
    pub const fn state(&self) -> MoveState {
        self.movement.state()
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> i32 {
        self.scoring.score()
    }

    /// Terrain held around the character.
    #[must_use]
    pub const fn terrain(&self) -> &TerrainStreamer {
        &self.terrain
    }

    /// Camera framing the character.
    #[must_use]
    pub const fn camera(&self) -> &CameraTracker {
        &self.camera
    }

    /// Cause of the most recent death in this run, if the character is dead.
    #[must_use]
    pub const fn death_cause(&self) -> Option<DeathCause> {
        self.last_death
    }

    /// Returns `true` while the character model should be drawn.
    #[must_use]
    pub fn is_character_visible(&self) -> bool {
        self.state() != MoveState::Dead
    }

    /// Attempts to move the character one cell.
    ///
    /// # Errors
    /// Returns [`TerrainError`] if the terrain window was not maintained. This
    /// signals a logic error, never an ordinary rejected move.
    pub fn try_move(&mut self, direction: Direction) -> Result<MoveOutcome, TerrainError> {
        let outcome = self.movement.try_move(direction, &self.terrain)?;
        let MoveOutcome::Accepted { to, direction: moved, .. } = outcome else {
            return Ok(outcome);
        };

        if moved == Direction::Up {
            self.camera.push_forward();
        }
        if let Some(score) = self.scoring.record(to.y) {
            self.events.on_score_changed(score);
        }
        self.terrain.ensure_window(to.y, self.events.as_mut());

        if self.scoring.has_fallen_behind(to.y) {
            let contact = fall_behind_contact(self.movement.character().world_position);
            debug!(
                "lane {} is more than the limit behind score {}",
                to.y,
                self.scoring.score()
            );
            self.kill(contact, DeathCause::FellBehind);
        }
        Ok(outcome)
    }

    /// Reports that the character touched a hazard at `contact_point`.
    ///
    /// Returns `true` if this killed the character; reports received while it
    /// is already dead are ignored.
    pub fn notify_collision(&mut self, contact_point: Vec3) -> bool {
        self.kill(contact_point, DeathCause::Collision)
    }

    /// Advances the simulation by one frame.
    ///
    /// `delta` is scaled game time and drives the hop animation; `unscaled`
    /// is wall-clock time and drives the camera shake.
    pub fn tick(&mut self, delta: f32, unscaled: f32) {
        self.movement.advance(delta);
        let frozen = self.state() == MoveState::Dead;
        self.camera
            .tick(self.movement.character().world_position, frozen, unscaled);
    }

    /// Starts a new level: clears the score, regenerates the terrain from the
    /// start region and returns the character to the start cell, ready.
    pub fn reset(&mut self) {
        self.movement.reset();
        self.scoring.reset();
        self.last_death = None;
        self.events.on_score_changed(self.scoring.score());
        self.terrain.reset(self.events.as_mut());
        self.camera.reset(self.movement.character().world_position);
        info!(
            "new level with {} lanes ahead",
            self.terrain.spawn_location()
        );
    }

    fn kill(&mut self, contact_point: Vec3, cause: DeathCause) -> bool {
        if !self.movement.kill() {
            return false;
        }
        self.last_death = Some(cause);
        let character = self.movement.character();
        info!(
            "character died ({cause:?}) at {:?} with score {}",
            character.grid_position,
            self.scoring.score()
        );
        let effect = DeathEffect::new(contact_point, character.world_position);
        self.events.on_character_hidden();
        self.events.on_death_effects_requested(effect);
        self.camera.start_shake();
        true
    }
}
