//! Score tracking and the fall-behind failure check.

use glam::Vec3;

use crate::constants::{FALL_BEHIND_CONTACT_OFFSET, FALL_BEHIND_LIMIT};

/// Derives the score from the furthest lane reached.
///
/// The score is `max(0, furthest_lane + 1)` and never decreases within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreMonitor {
    score: i32,
}

impl ScoreMonitor {
    /// Creates a monitor with a score of zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { score: 0 }
    }

    /// Current score.
    #[must_use]
    pub const fn score(&self) -> i32 {
        self.score
    }

    /// Records a move onto lane `destination_y`.
    ///
    /// Returns the new score when it increased.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanehop::scoring::ScoreMonitor;
    ///
    /// let mut monitor = ScoreMonitor::new();
    /// assert_eq!(monitor.record(-2), None);
    /// assert_eq!(monitor.record(4), Some(5));
    /// assert_eq!(monitor.record(1), None);
    /// assert_eq!(monitor.score(), 5);
    /// ```
    pub fn record(&mut self, destination_y: i32) -> Option<i32> {
        let candidate = destination_y + 1;
        if candidate > self.score {
            self.score = candidate;
            Some(candidate)
        } else {
            None
        }
    }

    /// Returns `true` when a character on lane `y` has dropped more than
    /// [`FALL_BEHIND_LIMIT`] lanes behind the score.
    #[must_use]
    pub const fn has_fallen_behind(&self, y: i32) -> bool {
        y < self.score - FALL_BEHIND_LIMIT
    }

    /// Clears the score for a new run.
    pub fn reset(&mut self) {
        self.score = 0;
    }
}

/// Synthetic contact point for a fall-behind death, slightly ahead of and
/// above the character so death effects have a plausible origin.
#[must_use]
pub fn fall_behind_contact(world_position: Vec3) -> Vec3 {
    let (x, y, z) = FALL_BEHIND_CONTACT_OFFSET;
    world_position + Vec3::new(x, y, z)
}
