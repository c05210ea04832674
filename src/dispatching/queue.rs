//! Binary-heap priority queue over a process arena.
//!
//! The queue stores indices into a caller-owned `[ProcessState]` slice
//! rather than copies, so the arena stays the single authoritative
//! record of every process. Each operation that needs to compare
//! entries takes the arena by shared reference.
//!
//! # Complexity
//! `insert`, `extract_min`: O(log n). `remove_by_id`: O(n) search plus
//! O(log n) repair. `peek_min`: O(1).

use crate::error::SchedulerError;
use crate::models::{ProcessId, ProcessState};

use super::OrderingPolicy;

/// Min-heap of arena indices ordered by an [`OrderingPolicy`].
#[derive(Debug, Clone)]
pub struct OrderedQueue {
    heap: Vec<usize>,
    policy: OrderingPolicy,
    capacity: Option<usize>,
}

impl OrderedQueue {
    /// Creates an unbounded queue.
    pub fn new(policy: OrderingPolicy) -> Self {
        Self {
            heap: Vec::new(),
            policy,
            capacity: None,
        }
    }

    /// Creates a queue that rejects inserts beyond `capacity` entries.
    pub fn with_capacity(policy: OrderingPolicy, capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            policy,
            capacity: Some(capacity),
        }
    }

    /// Current ordering policy.
    pub fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    /// Replaces the ordering policy and restores the heap property.
    pub fn set_policy(&mut self, policy: OrderingPolicy, arena: &[ProcessState]) {
        self.policy = policy;
        for i in (0..self.heap.len() / 2).rev() {
            self.sift_down(i, arena);
        }
    }

    /// Inserts the process at `index` in the arena.
    pub fn insert(&mut self, index: usize, arena: &[ProcessState]) -> Result<(), SchedulerError> {
        if let Some(capacity) = self.capacity {
            if self.heap.len() >= capacity {
                return Err(SchedulerError::QueueOverflow { capacity });
            }
        }
        self.heap.push(index);
        let last = self.heap.len() - 1;
        self.sift_up(last, arena);
        Ok(())
    }

    /// Removes and returns the minimum entry, or `None` when empty.
    pub fn extract_min(&mut self, arena: &[ProcessState]) -> Option<usize> {
        if self.heap.is_empty() {
            return None;
        }
        let min = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0, arena);
        }
        Some(min)
    }

    /// Returns the minimum entry without removing it.
    pub fn peek_min(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    /// Removes the entry whose process has id `id`.
    ///
    /// Returns its arena index, or `None` if no such entry is queued.
    pub fn remove_by_id(&mut self, id: ProcessId, arena: &[ProcessState]) -> Option<usize> {
        let pos = self.heap.iter().position(|&i| arena[i].id() == id)?;
        let removed = self.heap.swap_remove(pos);
        if pos < self.heap.len() {
            self.sift_up(pos, arena);
            self.sift_down(pos, arena);
        }
        Some(removed)
    }

    /// Whether the arena index is queued.
    pub fn contains(&self, index: usize) -> bool {
        self.heap.contains(&index)
    }

    /// Number of queued entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Removes every entry, keeping the policy.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Queued arena indices in heap (not sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.heap.iter().copied()
    }

    #[inline]
    fn less(&self, a: usize, b: usize, arena: &[ProcessState]) -> bool {
        self.policy
            .compare(&arena[self.heap[a]], &arena[self.heap[b]])
            .is_lt()
    }

    fn sift_up(&mut self, mut pos: usize, arena: &[ProcessState]) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if !self.less(pos, parent, arena) {
                break;
            }
            self.heap.swap(pos, parent);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize, arena: &[ProcessState]) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;

            if left < len && self.less(left, smallest, arena) {
                smallest = left;
            }
            if right < len && self.less(right, smallest, arena) {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.heap.swap(pos, smallest);
            pos = smallest;
        }
    }
}
