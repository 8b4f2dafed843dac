//! Discrete grid coordinates and movement directions.
//!
//! The grid's `y` axis runs forward along the strip of lanes and maps to world
//! `z`; the grid's `x` axis is lateral and maps to world `x`.

use std::ops::Add;

use glam::{IVec2, Vec3};

use crate::constants::{
    LANE_HALF_WIDTH, START_CELL, START_REGION_HALF_WIDTH, START_REGION_MAX_Y, START_REGION_MIN_Y,
};

/// A cell on the lane grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridCell {
    /// Lateral index within a lane.
    pub x: i32,
    /// Lane index along the forward axis. Negative lanes form the start region.
    pub y: i32,
}

impl GridCell {
    /// Creates a cell from its lateral and lane indices.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell the character occupies at the start of every run.
    #[must_use]
    pub const fn start() -> Self {
        Self::new(START_CELL.0, START_CELL.1)
    }

    /// Returns `true` when the cell lies in the obstacle-free start region.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanehop::grid::GridCell;
    ///
    /// assert!(GridCell::new(0, -1).in_start_region());
    /// assert!(GridCell::new(-5, -4).in_start_region());
    /// assert!(!GridCell::new(6, -1).in_start_region());
    /// assert!(!GridCell::new(0, 0).in_start_region());
    /// ```
    #[must_use]
    pub const fn in_start_region(self) -> bool {
        self.y > START_REGION_MIN_Y
            && self.y < START_REGION_MAX_Y
            && self.x > -START_REGION_HALF_WIDTH
            && self.x < START_REGION_HALF_WIDTH
    }

    /// Returns `true` when the cell lies within the walled lateral span of
    /// a lane, `[-LANE_HALF_WIDTH, LANE_HALF_WIDTH]`.
    #[must_use]
    pub const fn in_lane_span(self) -> bool {
        self.x >= -LANE_HALF_WIDTH && self.x <= LANE_HALF_WIDTH
    }

    /// Places the cell in world space at the given surface height.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Grid indices stay far below the 2^24 limit of exact f32 integers."
    )]
    #[must_use]
    pub fn to_world(self, height: f32) -> Vec3 {
        Vec3::new(self.x as f32, height, self.y as f32)
    }
}

impl Add<Direction> for GridCell {
    type Output = Self;

    fn add(self, direction: Direction) -> Self {
        let offset = direction.offset();
        Self::new(self.x + offset.x, self.y + offset.y)
    }
}

impl From<(i32, i32)> for GridCell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A normalized movement intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// No movement; ignored by the state machine.
    #[default]
    Zero,
    /// Forward, away from the start region.
    Up,
    /// Backward, towards the start region.
    Down,
    /// Lateral step towards negative `x`.
    Left,
    /// Lateral step towards positive `x`.
    Right,
}

impl Direction {
    /// The four non-zero directions.
    pub const CARDINALS: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Grid offset applied by a move in this direction.
    #[must_use]
    pub const fn offset(self) -> IVec2 {
        match self {
            Self::Zero => IVec2::ZERO,
            Self::Up => IVec2::new(0, 1),
            Self::Down => IVec2::new(0, -1),
            Self::Left => IVec2::new(-1, 0),
            Self::Right => IVec2::new(1, 0),
        }
    }

    /// Facing the character adopts after moving this way, if any.
    #[must_use]
    pub const fn facing(self) -> Option<Facing> {
        match self {
            Self::Zero => None,
            Self::Up => Some(Facing::Forward),
            Self::Down => Some(Facing::Backward),
            Self::Left => Some(Facing::Left),
            Self::Right => Some(Facing::Right),
        }
    }
}

/// Cardinal orientation of the character model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    /// Looking along `+Z`.
    #[default]
    Forward,
    /// Looking along `-Z`.
    Backward,
    /// Looking along `-X`.
    Left,
    /// Looking along `+X`.
    Right,
}

impl Facing {
    /// Yaw of the model in degrees, clockwise from `+Z` when viewed from above.
    #[must_use]
    pub const fn yaw_degrees(self) -> f32 {
        match self {
            Self::Forward => 0.0,
            Self::Backward => 180.0,
            Self::Left => -90.0,
            Self::Right => 90.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(Direction::Zero, GridCell::new(2, 3))]
    #[case::up(Direction::Up, GridCell::new(2, 4))]
    #[case::down(Direction::Down, GridCell::new(2, 2))]
    #[case::left(Direction::Left, GridCell::new(1, 3))]
    #[case::right(Direction::Right, GridCell::new(3, 3))]
    fn adding_direction_offsets_cell(#[case] direction: Direction, #[case] expected: GridCell) {
        assert_eq!(GridCell::new(2, 3) + direction, expected);
    }

    #[rstest]
    #[case::lower_lane_edge(GridCell::new(0, -5), false)]
    #[case::upper_lane_edge(GridCell::new(0, 0), false)]
    #[case::left_edge(GridCell::new(-6, -2), false)]
    #[case::right_edge(GridCell::new(6, -2), false)]
    #[case::inner_corner(GridCell::new(5, -4), true)]
    #[case::start(GridCell::start(), true)]
    fn start_region_bounds_are_exclusive(#[case] cell: GridCell, #[case] expected: bool) {
        assert_eq!(cell.in_start_region(), expected);
    }

    #[rstest]
    #[case::centre(0, true)]
    #[case::left_edge(-5, true)]
    #[case::right_edge(5, true)]
    #[case::past_left(-6, false)]
    #[case::past_right(6, false)]
    fn lane_span_is_walled_at_half_width(#[case] x: i32, #[case] expected: bool) {
        assert_eq!(GridCell::new(x, 12).in_lane_span(), expected);
    }

    #[rstest]
    #[case::forward(Facing::Forward, 0.0, Vec3::Z)]
    #[case::backward(Facing::Backward, 180.0, Vec3::NEG_Z)]
    #[case::left(Facing::Left, -90.0, Vec3::NEG_X)]
    #[case::right(Facing::Right, 90.0, Vec3::X)]
    fn yaw_turns_clockwise_from_forward(
        #[case] facing: Facing,
        #[case] yaw: f32,
        #[case] looks_along: Vec3,
    ) {
        assert!((facing.yaw_degrees() - yaw).abs() < f32::EPSILON);
        // Clockwise seen from above takes +Z towards +X.
        let radians = yaw.to_radians();
        let heading = Vec3::new(radians.sin(), 0.0, radians.cos());
        assert!(heading.abs_diff_eq(looks_along, 1e-6));
    }

    #[test]
    fn facing_follows_each_cardinal_direction() {
        assert_eq!(Direction::Up.facing(), Some(Facing::Forward));
        assert_eq!(Direction::Down.facing(), Some(Facing::Backward));
        assert_eq!(Direction::Left.facing(), Some(Facing::Left));
        assert_eq!(Direction::Right.facing(), Some(Facing::Right));
    }

    #[test]
    fn world_mapping_puts_lanes_on_z() {
        let world = GridCell::new(-3, 7).to_world(0.1);
        assert_eq!(world, Vec3::new(-3.0, 0.1, 7.0));
    }

    #[test]
    fn only_zero_has_no_facing() {
        assert_eq!(Direction::Zero.facing(), None);
        for direction in Direction::CARDINALS {
            assert!(direction.facing().is_some());
        }
    }
}
