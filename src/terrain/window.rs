//! Fixed-capacity sliding window of lanes.

use std::collections::VecDeque;

use super::Lane;

/// Ring buffer holding a contiguous run of lanes keyed by lane index.
///
/// Lanes are pushed in increasing index order. Pushing into a full window
/// evicts the oldest lane, so the window can never outgrow its capacity.
#[derive(Debug)]
pub struct LaneWindow {
    lanes: VecDeque<Lane>,
    capacity: usize,
}

impl LaneWindow {
    /// Creates an empty window holding at most `capacity` lanes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lanes: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Maximum number of lanes held at once.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of lanes currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lanes.len()
    }

    /// Returns `true` when no lanes are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }

    /// Index of the oldest lane held.
    #[must_use]
    pub fn first_index(&self) -> Option<i32> {
        self.lanes.front().map(|lane| lane.y)
    }

    /// Index one past the newest lane held.
    #[must_use]
    pub fn end_index(&self) -> Option<i32> {
        self.lanes.back().map(|lane| lane.y + 1)
    }

    /// Appends `lane`, returning the lane evicted to make room, if any.
    ///
    /// `lane.y` must directly follow the newest lane held.
    pub fn push(&mut self, lane: Lane) -> Option<Lane> {
        debug_assert!(
            self.end_index().is_none_or(|end| end == lane.y),
            "lane {} pushed out of order",
            lane.y
        );
        let evicted = if self.lanes.len() >= self.capacity {
            self.lanes.pop_front()
        } else {
            None
        };
        self.lanes.push_back(lane);
        evicted
    }

    /// Removes and returns the oldest lane if its index is below `y`.
    pub fn pop_before(&mut self, y: i32) -> Option<Lane> {
        if self.first_index().is_some_and(|first| first < y) {
            self.lanes.pop_front()
        } else {
            None
        }
    }

    /// Looks up lane `y`.
    #[must_use]
    pub fn get(&self, y: i32) -> Option<&Lane> {
        let first = self.first_index()?;
        let offset = usize::try_from(y.checked_sub(first)?).ok()?;
        self.lanes.get(offset)
    }

    /// Iterates lanes from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.iter()
    }

    /// Removes every lane, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = Lane> + '_ {
        self.lanes.drain(..)
    }
}
