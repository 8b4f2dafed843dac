//! Procedural terrain streaming.
//!
//! The [`TerrainStreamer`] generates lanes ahead of the character on demand and
//! evicts them once they fall behind the active window. Lane indices are
//! assigned monotonically and never reused within a run, so a lane that has
//! been evicted can never be queried again without a consistency error.

mod host;
mod window;

pub use host::{DetachedHost, LaneHandle, ObstaclePlacer, ScatteredObstacles, TerrainHost};
pub use window::LaneWindow;

#[cfg(test)]
pub use host::{MockObstaclePlacer, MockTerrainHost};

use std::ops::Range;

use hashbrown::HashSet;
use log::{debug, warn};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::constants::{
    GRASS_HEIGHT, LANE_HALF_WIDTH, ROAD_HEIGHT, ROAD_PROBABILITY_END, ROAD_PROBABILITY_START,
    ROAD_RAMP_LANES, START_REGION_HEIGHT,
};
use crate::events::RunnerEvents;
use crate::grid::GridCell;

/// Internal consistency failures of the terrain window.
///
/// These never occur while the window is maintained after every accepted
/// move; they indicate a logic error rather than a gameplay condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TerrainError {
    /// The lane existed once but has already been evicted.
    #[error("lane {y} was evicted; oldest retained lane is {first}")]
    LaneEvicted {
        /// Requested lane.
        y: i32,
        /// Oldest lane still held.
        first: i32,
    },
    /// The lane has not been generated yet.
    #[error("lane {y} has not been spawned; next lane to spawn is {spawn_location}")]
    LaneNotSpawned {
        /// Requested lane.
        y: i32,
        /// Index the next spawned lane will receive.
        spawn_location: i32,
    },
}

/// The two kinds of lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Safe lane; may carry static obstacles.
    Grass,
    /// Hazardous lane that can carry a moving vehicle.
    Road,
}

impl LaneKind {
    /// Height of the walkable surface of this kind of lane.
    #[must_use]
    pub const fn surface_height(self) -> f32 {
        match self {
            Self::Grass => GRASS_HEIGHT,
            Self::Road => ROAD_HEIGHT,
        }
    }
}

/// One row of the terrain strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    /// Lane index along the forward axis.
    pub y: i32,
    /// Whether the lane is grass or road.
    pub kind: LaneKind,
    /// Lateral indices blocked by obstacles.
    pub occupied_cells: HashSet<i32>,
    /// Handle to the external representation of the lane.
    pub handle: LaneHandle,
}

impl Lane {
    /// Bundles the parts of a lane.
    #[must_use]
    pub const fn new(
        y: i32,
        kind: LaneKind,
        occupied_cells: HashSet<i32>,
        handle: LaneHandle,
    ) -> Self {
        Self {
            y,
            kind,
            occupied_cells,
            handle,
        }
    }

    /// Height of the lane's walkable surface.
    #[must_use]
    pub const fn surface_height(&self) -> f32 {
        self.kind.surface_height()
    }

    /// Returns `true` when lateral cell `x` holds an obstacle.
    #[must_use]
    pub fn is_occupied(&self, x: i32) -> bool {
        self.occupied_cells.contains(&x)
    }
}

/// Probability that the lane at `spawn_location` is a road.
///
/// Rises linearly from 0.5 at lane 0 to 0.9 at lane 250 and stays there.
///
/// # Examples
///
/// ```
/// use lanehop::terrain::road_probability;
///
/// assert!((road_probability(0) - 0.5).abs() < 1e-6);
/// assert!((road_probability(125) - 0.7).abs() < 1e-6);
/// assert!((road_probability(1000) - 0.9).abs() < 1e-6);
/// ```
#[expect(
    clippy::cast_precision_loss,
    reason = "Lane indices stay far below the 2^24 limit of exact f32 integers."
)]
#[must_use]
pub fn road_probability(spawn_location: i32) -> f32 {
    let t = (spawn_location as f32 / ROAD_RAMP_LANES).clamp(0.0, 1.0);
    ROAD_PROBABILITY_START + (ROAD_PROBABILITY_END - ROAD_PROBABILITY_START) * t
}

/// Generates, stores and evicts lanes around the character.
pub struct TerrainStreamer {
    window: LaneWindow,
    spawn_location: i32,
    spawn_distance: i32,
    host: Box<dyn TerrainHost>,
    placer: Box<dyn ObstaclePlacer>,
    rng: ChaCha8Rng,
}

impl std::fmt::Debug for TerrainStreamer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerrainStreamer")
            .field("spawn_location", &self.spawn_location)
            .field("spawn_distance", &self.spawn_distance)
            .field("lanes", &self.window.len())
            .finish_non_exhaustive()
    }
}

impl TerrainStreamer {
    /// Creates an empty streamer. Call [`TerrainStreamer::reset`] to populate
    /// the initial window.
    ///
    /// `spawn_distance` must be positive; the ring buffer holds
    /// `2 * spawn_distance` lanes.
    #[must_use]
    pub fn new(
        spawn_distance: i32,
        host: Box<dyn TerrainHost>,
        placer: Box<dyn ObstaclePlacer>,
        rng: ChaCha8Rng,
    ) -> Self {
        let capacity = usize::try_from(spawn_distance.max(1)).unwrap_or(1) * 2;
        Self {
            window: LaneWindow::with_capacity(capacity),
            spawn_location: 0,
            spawn_distance,
            host,
            placer,
            rng,
        }
    }

    /// Index the next spawned lane will receive.
    #[must_use]
    pub const fn spawn_location(&self) -> i32 {
        self.spawn_location
    }

    /// Lanes kept on either side of the character.
    #[must_use]
    pub const fn spawn_distance(&self) -> i32 {
        self.spawn_distance
    }

    /// Range of lane indices currently held, if any.
    #[must_use]
    pub fn active_range(&self) -> Option<Range<i32>> {
        Some(self.window.first_index()?..self.window.end_index()?)
    }

    /// Looks up a held lane.
    #[must_use]
    pub fn lane(&self, y: i32) -> Option<&Lane> {
        self.window.get(y)
    }

    /// Iterates held lanes from oldest to newest.
    pub fn lanes(&self) -> impl Iterator<Item = &Lane> {
        self.window.iter()
    }

    /// Appends one lane at [`TerrainStreamer::spawn_location`].
    pub fn spawn_next(&mut self, events: &mut dyn RunnerEvents) {
        let y = self.spawn_location;
        let kind = if self.rng.gen::<f32>() < road_probability(y) {
            LaneKind::Road
        } else {
            LaneKind::Grass
        };

        let mut occupied = self.placer.place(y, kind, &mut self.rng);
        if (-LANE_HALF_WIDTH..=LANE_HALF_WIDTH).all(|x| occupied.contains(&x)) {
            warn!("{y} - {kind:?} was fully blocked; opening the centre cell");
            occupied.remove(&0);
        }

        let handle = self.host.create_lane(y, kind, &occupied);
        let lane = Lane::new(y, kind, occupied, handle);
        debug!("{y} - {kind:?} spawned");
        events.on_lane_spawned(&lane);

        if let Some(evicted) = self.window.push(lane) {
            self.release(evicted, events);
        }
        self.spawn_location += 1;
    }

    /// Spawns lanes until `spawn_distance` lanes lie ahead of `character_y`,
    /// evicting lanes that fall more than `spawn_distance` behind it.
    pub fn ensure_window(&mut self, character_y: i32, events: &mut dyn RunnerEvents) {
        while self.spawn_location < character_y + self.spawn_distance {
            self.spawn_next(events);
            while let Some(evicted) = self.window.pop_before(character_y - self.spawn_distance) {
                self.release(evicted, events);
            }
        }
    }

    /// Returns `true` when `cell` is a lane cell holding an obstacle.
    ///
    /// Cells in negative lanes are never blocked.
    ///
    /// # Errors
    /// Returns [`TerrainError`] when lane `cell.y` is not held.
    pub fn is_blocked(&self, cell: GridCell) -> Result<bool, TerrainError> {
        if cell.y < 0 {
            return Ok(false);
        }
        Ok(self.held_lane(cell.y)?.is_occupied(cell.x))
    }

    /// Height of the walkable surface of lane `y`.
    ///
    /// # Errors
    /// Returns [`TerrainError`] when `y >= 0` and lane `y` is not held.
    pub fn terrain_height_at(&self, y: i32) -> Result<f32, TerrainError> {
        if y < 0 {
            return Ok(START_REGION_HEIGHT);
        }
        Ok(self.held_lane(y)?.surface_height())
    }

    /// Releases every lane and repopulates the initial window ahead of the
    /// start region.
    pub fn reset(&mut self, events: &mut dyn RunnerEvents) {
        let drained: Vec<Lane> = self.window.drain().collect();
        for lane in drained {
            self.release(lane, events);
        }
        self.spawn_location = 0;
        // Lane 0 is the first lane past the start region.
        self.ensure_window(0, events);
    }

    fn held_lane(&self, y: i32) -> Result<&Lane, TerrainError> {
        if let Some(lane) = self.window.get(y) {
            return Ok(lane);
        }
        match self.window.first_index() {
            Some(first) if y < first => Err(TerrainError::LaneEvicted { y, first }),
            _ => Err(TerrainError::LaneNotSpawned {
                y,
                spawn_location: self.spawn_location,
            }),
        }
    }

    fn release(&mut self, lane: Lane, events: &mut dyn RunnerEvents) {
        debug!("{} - {:?} evicted", lane.y, lane.kind);
        self.host.release_lane(lane.handle);
        events.on_lane_evicted(&lane);
    }
}
