//! Collaborators the terrain streamer delegates to.
//!
//! The streamer decides *which* lanes exist. Creating their visual
//! representation and deciding where obstacles sit are handed to a
//! [`TerrainHost`] and an [`ObstaclePlacer`] injected at construction.

use hashbrown::HashSet;
use log::trace;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::LaneKind;
use crate::constants::LANE_HALF_WIDTH;

/// Opaque reference to the externally rendered representation of a lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LaneHandle(pub u64);

/// Creates and releases the external representation of lanes.
#[cfg_attr(test, mockall::automock)]
pub trait TerrainHost: Send + Sync {
    /// Materialises lane `y` and returns a handle to it.
    fn create_lane(&mut self, y: i32, kind: LaneKind, occupied: &HashSet<i32>) -> LaneHandle;

    /// Releases a handle previously returned by [`TerrainHost::create_lane`].
    fn release_lane(&mut self, handle: LaneHandle);
}

/// Host with no external scene, handing out sequential handles.
///
/// Used by headless runs and as the default for the Bevy adapter.
#[derive(Debug, Default)]
pub struct DetachedHost {
    next: u64,
    live: usize,
}

impl DetachedHost {
    /// Number of handles created and not yet released.
    #[must_use]
    pub const fn live_handles(&self) -> usize {
        self.live
    }
}

impl TerrainHost for DetachedHost {
    fn create_lane(&mut self, y: i32, kind: LaneKind, occupied: &HashSet<i32>) -> LaneHandle {
        let handle = LaneHandle(self.next);
        self.next += 1;
        self.live += 1;
        trace!(
            "{y} - {kind:?} materialised as {handle:?} with {} obstacles",
            occupied.len()
        );
        handle
    }

    fn release_lane(&mut self, handle: LaneHandle) {
        self.live = self.live.saturating_sub(1);
        trace!("released {handle:?}");
    }
}

/// Chooses which lateral cells of a new lane are blocked.
#[cfg_attr(test, mockall::automock)]
pub trait ObstaclePlacer: Send + Sync {
    /// Returns the blocked lateral indices for lane `y`.
    ///
    /// Implementations need not leave a cell open; the streamer repairs a lane
    /// whose playable span is fully blocked.
    fn place(&mut self, y: i32, kind: LaneKind, rng: &mut ChaCha8Rng) -> HashSet<i32>;
}

/// Scatters trees over grass lanes and leaves roads open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatteredObstacles {
    /// Probability that any one grass cell in the playable span is blocked.
    pub density: f32,
}

impl ScatteredObstacles {
    /// Creates a placer with the given per-cell density in `[0, 1]`.
    #[must_use]
    pub const fn new(density: f32) -> Self {
        Self { density }
    }
}

impl ObstaclePlacer for ScatteredObstacles {
    fn place(&mut self, _y: i32, kind: LaneKind, rng: &mut ChaCha8Rng) -> HashSet<i32> {
        match kind {
            LaneKind::Road => HashSet::new(),
            LaneKind::Grass => (-LANE_HALF_WIDTH..=LANE_HALF_WIDTH)
                .filter(|_| rng.gen::<f32>() < self.density)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn detached_host_counts_live_handles() {
        let mut host = DetachedHost::default();
        let a = host.create_lane(0, LaneKind::Grass, &HashSet::new());
        let b = host.create_lane(1, LaneKind::Road, &HashSet::new());
        assert_ne!(a, b);
        assert_eq!(host.live_handles(), 2);
        host.release_lane(a);
        assert_eq!(host.live_handles(), 1);
    }

    #[test]
    fn roads_are_never_blocked() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut placer = ScatteredObstacles::new(1.0);
        assert!(placer.place(4, LaneKind::Road, &mut rng).is_empty());
    }

    #[test]
    fn full_density_blocks_whole_grass_span() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut placer = ScatteredObstacles::new(1.0);
        let blocked = placer.place(4, LaneKind::Grass, &mut rng);
        let span = usize::try_from(2 * LANE_HALF_WIDTH + 1).unwrap_or_default();
        assert_eq!(blocked.len(), span);
    }

    #[test]
    fn zero_density_leaves_grass_open() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut placer = ScatteredObstacles::new(0.0);
        assert!(placer.place(4, LaneKind::Grass, &mut rng).is_empty());
    }
}
