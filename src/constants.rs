//! Gameplay constants shared across the simulation.
//!
//! Tunable values live in [`crate::config::RunnerConfig`]; the constants here
//! describe rules of the game itself and do not vary between runs.

/// Surface height of a grass lane.
pub const GRASS_HEIGHT: f32 = 0.2;
/// Surface height of a road lane.
pub const ROAD_HEIGHT: f32 = 0.1;
/// Surface height used for the start region, which has no lane object.
pub const START_REGION_HEIGHT: f32 = 0.2;

/// Peak height of the hop arc, reached at the midpoint of a move.
pub const HOP_HEIGHT: f32 = 0.5;

/// Probability that lane 0 is a road.
pub const ROAD_PROBABILITY_START: f32 = 0.5;
/// Probability that a lane at or beyond [`ROAD_RAMP_LANES`] is a road.
pub const ROAD_PROBABILITY_END: f32 = 0.9;
/// Number of lanes over which the road probability ramps up.
pub const ROAD_RAMP_LANES: f32 = 250.0;

/// Lateral half-width of the playable span of a lane.
///
/// Obstacle placement keeps at least one cell in
/// `[-LANE_HALF_WIDTH, LANE_HALF_WIDTH]` open.
pub const LANE_HALF_WIDTH: i32 = 5;

/// Exclusive lower lane bound of the start region.
pub const START_REGION_MIN_Y: i32 = -5;
/// Exclusive upper lane bound of the start region.
pub const START_REGION_MAX_Y: i32 = 0;
/// Exclusive lateral bound of the start region on either side.
pub const START_REGION_HALF_WIDTH: i32 = 6;

/// Grid cell the character occupies at the start of a run.
pub const START_CELL: (i32, i32) = (0, -1);

/// How many lanes the character may drop behind its score before dying.
pub const FALL_BEHIND_LIMIT: i32 = 10;

/// Offset from the character to the synthetic contact point used when the
/// character dies from falling behind.
pub const FALL_BEHIND_CONTACT_OFFSET: (f32, f32, f32) = (0.0, 0.2, 0.5);
