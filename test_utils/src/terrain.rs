//! Deterministic terrain collaborators.

use std::sync::{Arc, Mutex, PoisonError};

use hashbrown::{HashMap, HashSet};
use lanehop::{LaneHandle, LaneKind, ObstaclePlacer, TerrainHost};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Default)]
struct HostLedger {
    next: u64,
    live: HashMap<LaneHandle, i32>,
    created: usize,
    stray_releases: Vec<LaneHandle>,
}

/// Host that tracks which handles are live.
///
/// Clones share one ledger, so a test can keep a clone after handing the
/// host to the runner.
#[derive(Debug, Clone, Default)]
pub struct TrackingHost {
    ledger: Arc<Mutex<HostLedger>>,
}

impl TrackingHost {
    /// Creates a host with no live handles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with<T>(&self, f: impl FnOnce(&mut HostLedger) -> T) -> T {
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ledger)
    }

    /// Lane indices whose handles have not been released, sorted.
    #[must_use]
    pub fn live_lanes(&self) -> Vec<i32> {
        let mut lanes: Vec<i32> = self.with(|l| l.live.values().copied().collect());
        lanes.sort_unstable();
        lanes
    }

    /// Total handles ever created.
    #[must_use]
    pub fn created(&self) -> usize {
        self.with(|l| l.created)
    }

    /// Handles released that were never live: double releases or unknown
    /// handles.
    #[must_use]
    pub fn stray_releases(&self) -> Vec<LaneHandle> {
        self.with(|l| l.stray_releases.clone())
    }
}

impl TerrainHost for TrackingHost {
    fn create_lane(&mut self, y: i32, _kind: LaneKind, _occupied: &HashSet<i32>) -> LaneHandle {
        self.with(|l| {
            l.next += 1;
            let handle = LaneHandle(l.next);
            l.live.insert(handle, y);
            l.created += 1;
            handle
        })
    }

    fn release_lane(&mut self, handle: LaneHandle) {
        self.with(|l| {
            if l.live.remove(&handle).is_none() {
                l.stray_releases.push(handle);
            }
        });
    }
}

/// Placer that never places obstacles.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenField;

impl ObstaclePlacer for OpenField {
    fn place(&mut self, _y: i32, _kind: LaneKind, _rng: &mut ChaCha8Rng) -> HashSet<i32> {
        HashSet::new()
    }
}

/// Placer returning a fixed obstacle layout per lane.
#[derive(Debug, Clone, Default)]
pub struct FixedObstacles {
    layout: HashMap<i32, HashSet<i32>>,
}

impl FixedObstacles {
    /// Creates a layout with no obstacles.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks lateral cells `xs` on lane `y`.
    #[must_use]
    pub fn block(mut self, y: i32, xs: impl IntoIterator<Item = i32>) -> Self {
        self.layout.entry(y).or_default().extend(xs);
        self
    }
}

impl ObstaclePlacer for FixedObstacles {
    fn place(&mut self, y: i32, _kind: LaneKind, _rng: &mut ChaCha8Rng) -> HashSet<i32> {
        self.layout.get(&y).cloned().unwrap_or_default()
    }
}
