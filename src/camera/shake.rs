//! Time-bounded camera shake played when the character dies.

use glam::Vec3;
use rand_chacha::ChaCha8Rng;

use crate::vector_math::random_in_unit_sphere;

/// Jitters the rendered camera position around its base for a fixed time.
///
/// The shake is driven by unscaled time so it still plays while the game is
/// otherwise frozen after a death.
#[derive(Debug, Clone)]
pub struct ScreenShake {
    duration: f32,
    magnitude: f32,
    elapsed: Option<f32>,
    rng: ChaCha8Rng,
}

impl ScreenShake {
    /// Creates an idle shake lasting `duration` seconds with offsets of at
    /// most `magnitude`.
    #[must_use]
    pub const fn new(duration: f32, magnitude: f32, rng: ChaCha8Rng) -> Self {
        Self {
            duration,
            magnitude,
            elapsed: None,
            rng,
        }
    }

    /// Returns `true` while the shake is playing.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.elapsed.is_some()
    }

    /// Starts the shake. Returns `false` and leaves the timer untouched if a
    /// shake is already playing.
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.elapsed = Some(0.0);
        true
    }

    /// Stops the shake immediately.
    pub fn cancel(&mut self) {
        self.elapsed = None;
    }

    /// Advances the shake by `unscaled_delta` seconds and returns the position
    /// the camera should render at this tick.
    ///
    /// While playing, the result is `base` plus a random lateral and vertical
    /// offset; depth is never disturbed. Once the duration has elapsed the
    /// result is exactly `base`.
    pub fn advance(&mut self, unscaled_delta: f32, base: Vec3) -> Vec3 {
        let Some(elapsed) = self.elapsed else {
            return base;
        };
        if elapsed >= self.duration {
            self.elapsed = None;
            return base;
        }

        let offset = random_in_unit_sphere(&mut self.rng) * self.magnitude;
        self.elapsed = Some(elapsed + unscaled_delta.max(0.0));
        base + Vec3::new(offset.x, offset.y, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rstest::{fixture, rstest};

    const BASE: Vec3 = Vec3::new(1.0, 6.0, -4.0);

    #[fixture]
    fn shake() -> ScreenShake {
        ScreenShake::new(0.15, 0.15, ChaCha8Rng::seed_from_u64(8))
    }

    #[rstest]
    fn idle_shake_renders_base(mut shake: ScreenShake) {
        assert_eq!(shake.advance(0.016, BASE), BASE);
    }

    #[rstest]
    fn jitter_is_bounded_and_keeps_depth(mut shake: ScreenShake) {
        assert!(shake.start());
        for _ in 0..9 {
            let rendered = shake.advance(0.016, BASE);
            assert!((rendered.z - BASE.z).abs() < f32::EPSILON);
            assert!((rendered - BASE).length() <= 0.15 + 1e-6);
        }
    }

    #[rstest]
    fn restores_base_exactly_after_duration(mut shake: ScreenShake) {
        shake.start();
        for _ in 0..10 {
            shake.advance(0.05, BASE);
        }
        assert!(!shake.is_active());
        assert_eq!(shake.advance(0.05, BASE), BASE);
    }

    #[rstest]
    fn restart_while_active_is_ignored(mut shake: ScreenShake) {
        assert!(shake.start());
        shake.advance(0.1, BASE);
        assert!(!shake.start());
        // Only 0.05s remain; one more tick jitters, the next settles.
        shake.advance(0.1, BASE);
        assert_eq!(shake.advance(0.1, BASE), BASE);
        assert!(!shake.is_active());
    }
}
