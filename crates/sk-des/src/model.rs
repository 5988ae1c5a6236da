//! The `Model` trait — the extension point for domain simulations.

use crate::{RunSummary, SimContext};

/// A domain simulation: its entities, its event table and its result fold.
///
/// # Lifecycle
///
/// 1. [`init`][Self::init] once, at `t = 0`, before any event is popped.
///    Create entities and enqueue exogenous events here.
/// 2. [`handle`][Self::handle] once per event with `time ≤ horizon`, in
///    `(time, insertion)` order.
/// 3. [`on_period_end`][Self::on_period_end] each time the clock crosses a
///    period boundary (only if the simulator was built with a period).
/// 4. [`finish`][Self::finish] consumes the model and folds the final entity
///    state into `Output`.
///
/// # Example
///
/// ```rust,ignore
/// enum Tick { Ping }
///
/// struct Counter { pings: u32 }
///
/// impl Model for Counter {
///     type Event = Tick;
///     type Output = u32;
///
///     fn init(&mut self, ctx: &mut SimContext<'_, Tick>) {
///         ctx.schedule_at(Tick::Ping, 0.0);
///     }
///
///     fn handle(&mut self, _event: Tick, ctx: &mut SimContext<'_, Tick>) {
///         self.pings += 1;
///         ctx.schedule_after(Tick::Ping, 1.0);
///     }
///
///     fn finish(self, _summary: &RunSummary) -> u32 {
///         self.pings
///     }
/// }
/// ```
pub trait Model {
    /// Per-domain event payload.
    type Event;

    /// What one replication produces.
    type Output;

    fn init(&mut self, ctx: &mut SimContext<'_, Self::Event>);

    fn handle(&mut self, event: Self::Event, ctx: &mut SimContext<'_, Self::Event>);

    /// Called with the 0-based index of the period that just ended.
    /// `ctx.now()` is the boundary time.
    ///
    /// Default: does nothing.
    fn on_period_end(&mut self, _period: u64, _ctx: &mut SimContext<'_, Self::Event>) {}

    fn finish(self, summary: &RunSummary) -> Self::Output;
}
