//! The `Simulator` struct and its event loop.

use sk_core::{SeededRandom, SimClock, SimTime};
use sk_queue::EventQueue;
use tracing::trace;

use crate::{Model, SimContext, SimError, SimObserver, SimResult};

// ── RunSummary ────────────────────────────────────────────────────────────────

/// Loop bookkeeping handed to [`Model::finish`] and the observer.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Events popped and dispatched to the model.
    pub events_processed:  u64,
    /// Events still queued when the horizon stopped the loop.
    pub events_discarded:  u64,
    /// Clock value when the loop ended.
    pub final_time:        SimTime,
    /// Period-end callbacks emitted (0 when no period is configured).
    pub periods_completed: u64,
    pub horizon:           SimTime,
}

// ── Simulator ─────────────────────────────────────────────────────────────────

/// One replication: a model plus the queue, clock and RNG that drive it.
///
/// Create via [`SimBuilder`][crate::SimBuilder], which also runs
/// [`Model::init`].
pub struct Simulator<M: Model> {
    pub(crate) model:   M,
    pub(crate) queue:   EventQueue<M::Event>,
    pub(crate) rng:     SeededRandom,
    pub(crate) clock:   SimClock,
    pub(crate) horizon: SimTime,
    /// Period length in hours, if the model wants period snapshots.
    pub(crate) period:  Option<SimTime>,

    pub(crate) periods_completed: u64,
    pub(crate) events_processed:  u64,
    pub(crate) events_discarded:  u64,
}

impl<M: Model> Simulator<M> {
    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    #[inline]
    pub fn horizon(&self) -> SimTime {
        self.horizon
    }

    /// Read-only access to the model, e.g. to inspect entities mid-run.
    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    #[inline]
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// The seed of this replication's random stream.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            events_processed:  self.events_processed,
            events_discarded:  self.events_discarded,
            final_time:        self.clock.now(),
            periods_completed: self.periods_completed,
            horizon:           self.horizon,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run to completion and fold the model into its output.
    ///
    /// Use [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver<M::Event>>(mut self, observer: &mut O) -> SimResult<M::Output> {
        // A trailing period end may schedule more work, so drain again
        // after each one.
        loop {
            while self.step(observer)? {}
            if !self.close_trailing_period(observer) {
                break;
            }
        }

        let summary = self.summary();
        trace!(
            processed = summary.events_processed,
            discarded = summary.events_discarded,
            final_time = summary.final_time,
            "replication loop finished"
        );
        observer.on_sim_end(&summary);
        Ok(self.model.finish(&summary))
    }

    /// Process at most one event.
    ///
    /// Returns `Ok(false)` once the queue is exhausted or the horizon was
    /// reached; `Ok(true)` if an event was dispatched.
    pub fn step<O: SimObserver<M::Event>>(&mut self, observer: &mut O) -> SimResult<bool> {
        loop {
            let Some(next) = self.queue.next_time() else {
                return Ok(false);
            };

            // ── ① Horizon ─────────────────────────────────────────────────
            if next.is_nan() {
                return Err(SimError::NonFiniteTime);
            }
            if next > self.horizon {
                // The earliest pending event is already too late, so all are.
                self.events_discarded += self.queue.len() as u64;
                self.queue.clear();
                return Ok(false);
            }
            if next < self.clock.now() {
                return Err(SimError::EventInPast { time: next, now: self.clock.now() });
            }

            // ── ② Period boundaries, one at a time ────────────────────────
            //
            // A period-end callback may schedule new events, so re-peek after
            // each boundary instead of closing them all at once.
            if let Some(boundary) = self.next_boundary_through(next) {
                self.end_period(boundary, observer);
                continue;
            }

            let Some(event) = self.queue.pop() else {
                return Ok(false);
            };

            // ── ③ Clock, ④ dispatch ───────────────────────────────────────
            self.clock.advance_to(event.time);
            observer.on_event(event.time, &event.kind);
            let mut ctx =
                SimContext::new(self.clock.now(), self.horizon, &mut self.queue, &mut self.rng);
            self.model.handle(event.kind, &mut ctx);
            self.events_processed += 1;
            return Ok(true);
        }
    }

    // ── Period bookkeeping ────────────────────────────────────────────────

    /// Total number of periods in `[0, horizon]`, counting a trailing partial
    /// period.
    fn total_periods(&self) -> u64 {
        match self.period {
            Some(len) => (self.horizon / len).ceil() as u64,
            None => 0,
        }
    }

    /// The next unclosed period boundary, if it is `≤ t`.
    fn next_boundary_through(&self, t: SimTime) -> Option<SimTime> {
        let len = self.period?;
        if self.periods_completed >= self.total_periods() {
            return None;
        }
        let boundary = (self.periods_completed + 1) as f64 * len;
        (boundary <= t).then_some(boundary)
    }

    /// After the queue drains: close the next period that never saw an
    /// event, so each period gets a snapshot.  The last one ends at the
    /// horizon.  Returns `false` when all periods are closed.
    fn close_trailing_period<O: SimObserver<M::Event>>(&mut self, observer: &mut O) -> bool {
        let Some(len) = self.period else { return false };
        if self.periods_completed >= self.total_periods() {
            return false;
        }
        let boundary = ((self.periods_completed + 1) as f64 * len).min(self.horizon);
        self.end_period(boundary, observer);
        true
    }

    fn end_period<O: SimObserver<M::Event>>(&mut self, boundary: SimTime, observer: &mut O) {
        let period = self.periods_completed;
        if boundary > self.clock.now() {
            self.clock.advance_to(boundary);
        }
        let mut ctx = SimContext::new(self.clock.now(), self.horizon, &mut self.queue, &mut self.rng);
        self.model.on_period_end(period, &mut ctx);
        observer.on_period_end(period, boundary);
        self.periods_completed += 1;
    }
}
