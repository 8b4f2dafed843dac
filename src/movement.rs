//! Grid movement state machine.
//!
//! The character moves one cell at a time. A committed move updates the
//! authoritative grid position immediately and then animates the world
//! position as a hop over `move_duration` seconds, advanced by
//! [`MovementStateMachine::advance`] once per tick.
//!
//! ```text
//!          try_move (accepted)          hop finished
//!   Ready ---------------------> Moving -------------> Ready
//!     |                           |
//!     +-------- kill -------------+----> Dead ---- reset ----> Ready
//! ```
//!
//! A death during a hop lets the animation run to completion but never
//! returns the character to `Ready`.

use std::f32::consts::PI;

use glam::Vec3;
use log::debug;

use crate::constants::{HOP_HEIGHT, START_REGION_HEIGHT};
use crate::grid::{Direction, Facing, GridCell};
use crate::terrain::{TerrainError, TerrainStreamer};

/// Phase of the movement state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MoveState {
    /// Accepting move intents.
    #[default]
    Ready,
    /// Animating a committed move; intents are ignored.
    Moving,
    /// Terminal until the level is reset.
    Dead,
}

/// Result of a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was committed.
    Accepted {
        /// Cell the character left.
        from: GridCell,
        /// Cell the character now occupies.
        to: GridCell,
        /// Direction of travel.
        direction: Direction,
    },
    /// The intent was zero or the character was not ready.
    Ignored,
    /// The target cell is outside the start region or holds an obstacle.
    Blocked,
}

impl MoveOutcome {
    /// Returns `true` for [`MoveOutcome::Accepted`].
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// State of the player character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Character {
    /// Authoritative discrete position.
    pub grid_position: GridCell,
    /// Interpolated position used for rendering and camera tracking.
    pub world_position: Vec3,
    /// Orientation of the model.
    pub facing: Facing,
    /// Current phase.
    pub state: MoveState,
}

impl Character {
    /// A character standing on the start cell, ready to move.
    #[must_use]
    pub fn at_start() -> Self {
        let grid_position = GridCell::start();
        Self {
            grid_position,
            world_position: grid_position.to_world(START_REGION_HEIGHT),
            facing: Facing::Forward,
            state: MoveState::Ready,
        }
    }
}

impl Default for Character {
    fn default() -> Self {
        Self::at_start()
    }
}

/// Progress of one hop between cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopAnimation {
    start: Vec3,
    end: Vec3,
    elapsed: f32,
    duration: f32,
}

impl HopAnimation {
    /// Starts a hop from `start` to `end` lasting `duration` seconds.
    #[must_use]
    pub const fn new(start: Vec3, end: Vec3, duration: f32) -> Self {
        Self {
            start,
            end,
            elapsed: 0.0,
            duration,
        }
    }

    /// Fraction of the hop completed, in `[0, 1]`.
    #[must_use]
    pub fn percent(&self) -> f32 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Returns `true` once the elapsed time reaches the duration.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Final resting position of the hop.
    #[must_use]
    pub const fn end(&self) -> Vec3 {
        self.end
    }

    /// Position along the hop at the current progress.
    ///
    /// Horizontal components interpolate linearly; the height follows a sine
    /// arc peaking at [`HOP_HEIGHT`] halfway through.
    #[must_use]
    pub fn sample(&self) -> Vec3 {
        let percent = self.percent();
        let mut position = self.start.lerp(self.end, percent);
        position.y = HOP_HEIGHT * (PI * percent).sin();
        position
    }

    /// Advances the hop by `delta` seconds.
    pub fn advance(&mut self, delta: f32) {
        self.elapsed += delta.max(0.0);
    }
}

/// Owns the character and validates and animates its moves.
#[derive(Debug, Clone)]
pub struct MovementStateMachine {
    character: Character,
    animation: Option<HopAnimation>,
    move_duration: f32,
}

impl MovementStateMachine {
    /// Creates a state machine with the character on the start cell.
    #[must_use]
    pub fn new(move_duration: f32) -> Self {
        Self {
            character: Character::at_start(),
            animation: None,
            move_duration,
        }
    }

    /// Current character state.
    #[must_use]
    pub const fn character(&self) -> &Character {
        &self.character
    }

    /// Current phase.
    #[must_use]
    pub const fn state(&self) -> MoveState {
        self.character.state
    }

    /// Hop in progress, if any.
    #[must_use]
    pub const fn animation(&self) -> Option<&HopAnimation> {
        self.animation.as_ref()
    }

    /// Attempts to move one cell in `direction`.
    ///
    /// Zero intents and intents received outside [`MoveState::Ready`] are
    /// ignored. A move is accepted when the target lies in the start region,
    /// or lies on a lane within its walled lateral span and is not blocked.
    /// Rejected moves change nothing.
    ///
    /// # Errors
    /// Returns [`TerrainError`] if the target lane is not held by `terrain`,
    /// which means the active window was not maintained.
    pub fn try_move(
        &mut self,
        direction: Direction,
        terrain: &TerrainStreamer,
    ) -> Result<MoveOutcome, TerrainError> {
        if direction == Direction::Zero || self.character.state != MoveState::Ready {
            return Ok(MoveOutcome::Ignored);
        }

        let from = self.character.grid_position;
        let to = from + direction;
        let walkable = to.in_start_region()
            || (to.y >= 0 && to.in_lane_span() && !terrain.is_blocked(to)?);
        if !walkable {
            return Ok(MoveOutcome::Blocked);
        }

        let end = to.to_world(terrain.terrain_height_at(to.y)?);
        let hop = HopAnimation::new(self.character.world_position, end, self.move_duration);
        debug!("hop {from:?} -> {to:?}");

        self.character.grid_position = to;
        self.character.world_position = hop.sample();
        if let Some(facing) = direction.facing() {
            self.character.facing = facing;
        }
        self.character.state = MoveState::Moving;
        self.animation = Some(hop);

        Ok(MoveOutcome::Accepted {
            from,
            to,
            direction,
        })
    }

    /// Advances the hop in progress by `delta` seconds.
    ///
    /// Returns `true` on the tick the hop completes. Completion snaps the
    /// character to the destination and returns it to [`MoveState::Ready`]
    /// unless it died mid-hop.
    pub fn advance(&mut self, delta: f32) -> bool {
        let Some(hop) = self.animation.as_mut() else {
            return false;
        };
        hop.advance(delta);
        if !hop.is_finished() {
            self.character.world_position = hop.sample();
            return false;
        }

        self.character.world_position = hop.end();
        self.animation = None;
        if self.character.state == MoveState::Moving {
            self.character.state = MoveState::Ready;
        }
        true
    }

    /// Moves the character to [`MoveState::Dead`].
    ///
    /// Returns `false`, changing nothing, if the character was already dead.
    pub fn kill(&mut self) -> bool {
        if self.character.state == MoveState::Dead {
            return false;
        }
        self.character.state = MoveState::Dead;
        true
    }

    /// Aborts any hop and returns the character to the start cell.
    pub fn reset(&mut self) {
        self.character = Character::at_start();
        self.animation = None;
    }
}
