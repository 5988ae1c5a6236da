//! Mutable view of the simulation handed to every model callback.

use sk_core::{SeededRandom, SimTime};
use sk_queue::EventQueue;

/// What a [`Model`](crate::Model) callback may touch: the clock (read-only),
/// the pending-event queue and the replication's random stream.
///
/// A fresh context is built for each callback; it borrows the simulator's
/// queue and RNG for the duration of that one call.
pub struct SimContext<'a, K> {
    now:     SimTime,
    horizon: SimTime,
    queue:   &'a mut EventQueue<K>,
    rng:     &'a mut SeededRandom,
}

impl<'a, K> SimContext<'a, K> {
    #[inline]
    pub fn new(
        now:     SimTime,
        horizon: SimTime,
        queue:   &'a mut EventQueue<K>,
        rng:     &'a mut SeededRandom,
    ) -> Self {
        Self { now, horizon, queue, rng }
    }

    /// Current simulated time in hours.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    /// `true` if something scheduled `delay` hours from now would still be
    /// processed.
    #[inline]
    pub fn within_horizon(&self, delay: SimTime) -> bool {
        self.now + delay <= self.horizon
    }

    #[inline]
    pub fn rng(&mut self) -> &mut SeededRandom {
        self.rng
    }

    /// Schedule `kind` at absolute time `time`.
    pub fn schedule_at(&mut self, kind: K, time: SimTime) {
        self.queue.schedule_at(kind, time);
    }

    /// Schedule `kind` at `now + delay`.
    pub fn schedule_after(&mut self, kind: K, delay: SimTime) {
        self.queue.schedule_after(kind, self.now, delay);
    }

    /// Number of events still pending.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
