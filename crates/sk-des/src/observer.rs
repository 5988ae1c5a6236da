//! Simulation observer trait for tracing and data collection.

use sk_core::SimTime;

use crate::RunSummary;

/// Callbacks invoked by [`Simulator::run`][crate::Simulator::run] at key
/// points in the event loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Observers see events *before* the model
/// handles them and cannot schedule anything.
pub trait SimObserver<K> {
    /// Called just before `event` is dispatched at `time`.
    fn on_event(&mut self, _time: SimTime, _event: &K) {}

    /// Called after the model's own `on_period_end` for `period`.
    fn on_period_end(&mut self, _period: u64, _time: SimTime) {}

    /// Called once, after the last period end and before `Model::finish`.
    fn on_sim_end(&mut self, _summary: &RunSummary) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl<K> SimObserver<K> for NoopObserver {}
