//! Turning gestures into move intents.
//!
//! Capturing touches or key presses is the host application's job. These
//! helpers only interpret an already measured gesture and gate intents for a
//! short while after a restart, so the tap that restarts a run does not also
//! move the character.

use glam::Vec2;

use crate::grid::Direction;

/// Classifies a completed touch gesture.
///
/// `delta` is the screen-space movement from touch start to touch end, with
/// `+y` pointing up the screen. Gestures shorter than `threshold` are taps
/// and move the character forward; longer ones move along their dominant
/// axis.
///
/// # Examples
///
/// ```
/// use glam::Vec2;
/// use lanehop::grid::Direction;
/// use lanehop::intent::classify_swipe;
///
/// assert_eq!(classify_swipe(Vec2::new(5.0, -3.0), 60.0), Direction::Up);
/// assert_eq!(classify_swipe(Vec2::new(-90.0, 20.0), 60.0), Direction::Left);
/// assert_eq!(classify_swipe(Vec2::new(10.0, -80.0), 60.0), Direction::Down);
/// ```
#[must_use]
pub fn classify_swipe(delta: Vec2, threshold: f32) -> Direction {
    if delta.length() < threshold {
        return Direction::Up;
    }
    if delta.x.abs() > delta.y.abs() {
        if delta.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if delta.y > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

/// Suppresses intents for a fixed time after a restart.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputLock {
    remaining: f32,
}

impl InputLock {
    /// Locks input for `duration` seconds.
    pub fn engage(&mut self, duration: f32) {
        self.remaining = duration.max(0.0);
    }

    /// Counts the lock down by `delta` seconds.
    pub fn tick(&mut self, delta: f32) {
        self.remaining = (self.remaining - delta).max(0.0);
    }

    /// Returns `true` while intents must be ignored.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.remaining > 0.0
    }

    /// Passes `direction` through unless the lock is engaged.
    #[must_use]
    pub const fn filter(&self, direction: Direction) -> Direction {
        if self.is_locked() {
            Direction::Zero
        } else {
            direction
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const THRESHOLD: f32 = 60.0;

    #[rstest]
    #[case::tap(Vec2::new(10.0, 10.0), Direction::Up)]
    #[case::swipe_right(Vec2::new(100.0, 30.0), Direction::Right)]
    #[case::swipe_left(Vec2::new(-100.0, -30.0), Direction::Left)]
    #[case::swipe_up(Vec2::new(20.0, 100.0), Direction::Up)]
    #[case::swipe_down(Vec2::new(-20.0, -100.0), Direction::Down)]
    #[case::diagonal_tie_is_vertical(Vec2::new(-70.0, -70.0), Direction::Down)]
    fn gestures_map_to_directions(#[case] delta: Vec2, #[case] expected: Direction) {
        assert_eq!(classify_swipe(delta, THRESHOLD), expected);
    }

    #[test]
    fn lock_expires_after_duration() {
        let mut lock = InputLock::default();
        lock.engage(0.2);
        assert_eq!(lock.filter(Direction::Up), Direction::Zero);
        lock.tick(0.1);
        assert!(lock.is_locked());
        lock.tick(0.15);
        assert!(!lock.is_locked());
        assert_eq!(lock.filter(Direction::Left), Direction::Left);
    }
}
