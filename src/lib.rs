#![cfg_attr(docsrs, feature(doc_cfg))]
//! Simulation core for an endless lane-crossing runner.
//!
//! A character hops across an infinite strip of grass and road lanes. The
//! crate owns the rules: grid movement with hop animation, procedural lane
//! streaming, score and fall-behind tracking, and camera framing with a death
//! shake. Rendering, audio and input capture stay outside and talk to the
//! core through [`LaneRunner`] and the [`RunnerEvents`] notifications.
//!
//! ```
//! use lanehop::{Direction, LaneRunner, MoveOutcome, RunnerConfig};
//!
//! let config = RunnerConfig { seed: Some(1), obstacle_density: 0.0, ..RunnerConfig::default() };
//! let mut runner = LaneRunner::headless(config).unwrap();
//! assert!(matches!(runner.try_move(Direction::Up), Ok(MoveOutcome::Accepted { .. })));
//! runner.tick(0.1, 0.1);
//! assert_eq!(runner.score(), 1);
//! ```
pub mod camera;
pub mod config;
pub mod constants;
pub mod events;
pub mod grid;
pub mod intent;
pub mod logging;
pub mod movement;
pub mod plugin;
pub mod runner;
pub mod scoring;
pub mod terrain;
pub mod vector_math;

pub use camera::{CameraRig, CameraTracker};
pub use config::{ConfigError, RunnerConfig};
pub use events::{DeathEffect, LogEvents, NullEvents, RunnerEvents};
pub use grid::{Direction, Facing, GridCell};
pub use logging::init as init_logging;
pub use movement::{Character, MoveOutcome, MoveState};
pub use plugin::{LaneRunnerPlugin, LaneRunnerState, RunnerCommand, RunnerCommands};
pub use runner::{DeathCause, LaneRunner};
pub use terrain::{
    DetachedHost, Lane, LaneHandle, LaneKind, ObstaclePlacer, ScatteredObstacles, TerrainError,
    TerrainHost, TerrainStreamer,
};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use lanehop::prelude::*;
    //! ```

    pub use crate::Direction;
    pub use crate::GridCell;
    pub use crate::LaneRunner;
    pub use crate::LaneRunnerPlugin;
    pub use crate::MoveOutcome;
    pub use crate::MoveState;
    pub use crate::RunnerConfig;
    pub use crate::RunnerEvents;
}
