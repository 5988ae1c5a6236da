use std::cmp::Ordering;

use sk_core::SimTime;

/// A scheduled occurrence: *what* happens (`kind`) and *when* (`time`).
///
/// `K` is a per-model enum whose variants carry exactly the ids and fields
/// their handler needs.  Events are immutable once queued.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimEvent<K> {
    pub time: SimTime,
    pub kind: K,
    /// Insertion sequence number; set by [`EventQueue`](crate::EventQueue).
    pub(crate) seq: u64,
}

impl<K> SimEvent<K> {
    /// An unqueued event.  Its sequence number is assigned on push.
    pub fn new(time: SimTime, kind: K) -> Self {
        Self { time, kind, seq: 0 }
    }

    /// Position of this event in the queue's insertion order.
    #[inline]
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Heap ordering key.  `total_cmp` keeps the order total even for
    /// values the queue should never see (NaN).
    #[inline]
    pub(crate) fn key_cmp(&self, other: &Self) -> Ordering {
        self.time.total_cmp(&other.time).then(self.seq.cmp(&other.seq))
    }
}
