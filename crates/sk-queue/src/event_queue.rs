//! `EventQueue` — binary min-heap of pending simulation events.
//!
//! # Why a hand-written heap
//!
//! `std::collections::BinaryHeap` is a max-heap keyed on `Ord`, which `f64`
//! does not implement.  Wrapping every event in a reversed newtype works, but
//! the explicit sift-up / sift-down below keeps the `(time, seq)` ordering in
//! one place and lets `drain_sorted` and the invariant checker in the tests
//! see the raw array.
//!
//! # Invariant
//!
//! After every public operation, each non-root node's `(time, seq)` key is
//! `>=` its parent's.  `push`/`pop` are O(log n), `peek` is O(1).  The queue
//! is unbounded; a model that keeps rescheduling forever is bounded by the
//! simulator's horizon check, not here.

use sk_core::SimTime;

use crate::SimEvent;

#[derive(Debug)]
pub struct EventQueue<K> {
    heap:     Vec<SimEvent<K>>,
    next_seq: u64,
}

impl<K> Default for EventQueue<K> {
    fn default() -> Self {
        Self { heap: Vec::new(), next_seq: 0 }
    }
}

impl<K> EventQueue<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the backing array for `capacity` pending events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { heap: Vec::with_capacity(capacity), next_seq: 0 }
    }

    /// Insert `event`, stamping it with the next insertion sequence number.
    ///
    /// Returns the sequence number assigned.
    pub fn push(&mut self, mut event: SimEvent<K>) -> u64 {
        event.seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(event);
        self.sift_up(self.heap.len() - 1);
        self.next_seq - 1
    }

    /// Remove and return the earliest event, or `None` when empty.
    pub fn pop(&mut self) -> Option<SimEvent<K>> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let min = self.heap.pop();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        min
    }

    /// The earliest event without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&SimEvent<K>> {
        self.heap.first()
    }

    /// Time of the earliest event.
    #[inline]
    pub fn next_time(&self) -> Option<SimTime> {
        self.peek().map(|e| e.time)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drop every pending event.  The sequence counter keeps running so
    /// events pushed afterwards still order after anything popped before.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Schedule `kind` at absolute time `time`.
    pub fn schedule_at(&mut self, kind: K, time: SimTime) -> u64 {
        self.push(SimEvent::new(time, kind))
    }

    /// Schedule `kind` at `now + delay`.
    ///
    /// A negative delay would schedule into the past; that is a model bug and
    /// is only checked in debug builds.
    pub fn schedule_after(&mut self, kind: K, now: SimTime, delay: SimTime) -> u64 {
        debug_assert!(delay >= 0.0, "negative scheduling delay {delay}");
        self.push(SimEvent::new(now + delay, kind))
    }

    /// Pop everything, earliest first.
    pub fn drain_sorted(&mut self) -> Vec<SimEvent<K>> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(event) = self.pop() {
            out.push(event);
        }
        out
    }

    // ── Heap maintenance ──────────────────────────────────────────────────

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if self.heap[parent].key_cmp(&self.heap[idx]).is_le() {
                break;
            }
            self.heap.swap(parent, idx);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * idx + 1;
            let right = left + 1;
            let mut smallest = idx;

            if left < len && self.heap[left].key_cmp(&self.heap[smallest]).is_lt() {
                smallest = left;
            }
            if right < len && self.heap[right].key_cmp(&self.heap[smallest]).is_lt() {
                smallest = right;
            }
            if smallest == idx {
                break;
            }
            self.heap.swap(idx, smallest);
            idx = smallest;
        }
    }

    /// `true` if every node is ordered after its parent.
    #[cfg(test)]
    pub(crate) fn is_heap(&self) -> bool {
        (1..self.heap.len()).all(|i| self.heap[(i - 1) / 2].key_cmp(&self.heap[i]).is_le())
    }
}

impl<K> Extend<SimEvent<K>> for EventQueue<K> {
    fn extend<I: IntoIterator<Item = SimEvent<K>>>(&mut self, iter: I) {
        for event in iter {
            self.push(event);
        }
    }
}

impl<K> FromIterator<SimEvent<K>> for EventQueue<K> {
    fn from_iter<I: IntoIterator<Item = SimEvent<K>>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}
