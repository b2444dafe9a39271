//! Min-priority queue of flooding candidates.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::topology::Coord;

/// A cell waiting to be flooded.
#[derive(Clone, Copy, Debug)]
pub struct Candidate {
    pub coord: Coord,
    /// Flooding priority, never below the priority of the cell that enqueued it.
    pub priority: f64,
    /// Raw intensity of `coord`.
    pub raw: f64,
    /// Compactness penalty accumulated along the growth path, so that
    /// `raw + increment` is the priority before the flood-level floor.
    pub increment: f64,
    /// Label of the region that enqueued this cell.
    pub label: u32,
    /// Marker cell the growth path started from.
    pub origin: Coord,
    /// Insertion sequence, stamped by [`FloodQueue::push`].
    pub seq: u64,
}

impl Candidate {
    pub fn new(
        coord: Coord,
        priority: f64,
        raw: f64,
        increment: f64,
        label: u32,
        origin: Coord,
    ) -> Self {
        Self {
            coord,
            priority,
            raw,
            increment,
            label,
            origin,
            seq: 0,
        }
    }
}

// BinaryHeap is a max-heap, so the comparison is reversed: lower priority
// first, then older insertion first.
struct Entry(Candidate);

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .0
            .priority
            .total_cmp(&self.0.priority)
            .then_with(|| other.0.seq.cmp(&self.0.seq))
    }
}

/// Priority queue ordered by ascending priority, ties broken by insertion order.
///
/// Does not deduplicate coordinates.
#[derive(Default)]
pub struct FloodQueue {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl FloodQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(capacity),
            next_seq: 0,
        }
    }

    /// Push a candidate, stamping it with the next insertion sequence number.
    pub fn push(&mut self, mut candidate: Candidate) {
        candidate.seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry(candidate));
    }

    pub fn pop_min(&mut self) -> Option<Candidate> {
        self.heap.pop().map(|entry| entry.0)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Total number of candidates ever pushed.
    pub fn pushed(&self) -> u64 {
        self.next_seq
    }
}
