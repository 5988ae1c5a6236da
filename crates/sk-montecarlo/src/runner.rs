//! The `MonteCarloRunner` and its two loop shapes.

use std::time::Instant;

use crate::{BatchedProgressInfo, HostScheduler, ProgressInfo, RunnerConfig, ThreadYield};

/// Progress callback that ignores every report.
pub fn no_progress<P>(_progress: P) {}

/// Stop predicate that never stops.
pub fn never_stop(_completed: usize) -> bool {
    false
}

/// Runs iterations one after another, reporting progress and yielding to the
/// host between them.
///
/// The runner is single-threaded; each iteration runs to completion before
/// the next starts.  See [`run_replications_parallel`] for the Rayon path.
///
/// [`run_replications_parallel`]: crate::run_replications_parallel
pub struct MonteCarloRunner<S: HostScheduler = ThreadYield> {
    config:     RunnerConfig,
    scheduler:  S,
    last_yield: Instant,
}

impl Default for MonteCarloRunner<ThreadYield> {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

impl MonteCarloRunner<ThreadYield> {
    pub fn new(config: RunnerConfig) -> Self {
        Self::with_scheduler(config, ThreadYield)
    }
}

impl<S: HostScheduler> MonteCarloRunner<S> {
    pub fn with_scheduler(config: RunnerConfig, scheduler: S) -> Self {
        Self { config, scheduler, last_yield: Instant::now() }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn into_scheduler(self) -> S {
        self.scheduler
    }

    // ── Flat loop ─────────────────────────────────────────────────────────

    /// Run `iteration_fn(i)` for `i in 0..total` and collect the results.
    ///
    /// `should_stop` receives the number of iterations completed so far and
    /// is checked before each iteration.  The last progress report is 100 %
    /// when every iteration ran and the completed fraction otherwise.
    pub fn run<T, F, P, C>(
        &mut self,
        total:            usize,
        mut iteration_fn: F,
        mut on_progress:  P,
        mut should_stop:  C,
    ) -> Vec<T>
    where
        F: FnMut(usize) -> T,
        P: FnMut(ProgressInfo),
        C: FnMut(usize) -> bool,
    {
        let every = self.config.progress_every.max(1);
        let mut results = Vec::with_capacity(total);
        self.last_yield = Instant::now();

        for i in 0..total {
            if should_stop(results.len()) {
                break;
            }

            if i == 0 || i % every == 0 || i + 1 == total {
                on_progress(ProgressInfo::before(i, total));
                self.yield_to_host();
            }

            results.push(iteration_fn(i));
            self.maybe_yield();
        }

        on_progress(ProgressInfo::finished(results.len(), total));
        results
    }

    // ── Nested loop ───────────────────────────────────────────────────────

    /// Run `iteration_fn(outer, inner, outer_idx, inner_idx)` over the full
    /// `outer × inner` grid, one result row per outer item.
    ///
    /// Progress is reported on the combined count; the host gets a yield
    /// after every outer row regardless of the time-based policy.  A stop
    /// request leaves the current row short.
    pub fn run_batched<O, I, T, F, P, C>(
        &mut self,
        outer:            &[O],
        inner:            &[I],
        mut iteration_fn: F,
        mut on_progress:  P,
        mut should_stop:  C,
    ) -> Vec<Vec<T>>
    where
        F: FnMut(&O, &I, usize, usize) -> T,
        P: FnMut(BatchedProgressInfo),
        C: FnMut(usize) -> bool,
    {
        let every = self.config.progress_every.max(1);
        let total = outer.len() * inner.len();
        let mut completed = 0usize;
        let mut rows = Vec::with_capacity(outer.len());
        self.last_yield = Instant::now();

        let batched = |progress: ProgressInfo, outer_index: usize, inner_index: usize| BatchedProgressInfo {
            progress,
            outer_index,
            inner_index,
            outer_total: outer.len(),
            inner_total: inner.len(),
        };

        'outer: for (oi, o) in outer.iter().enumerate() {
            if should_stop(completed) {
                break;
            }
            let mut row = Vec::with_capacity(inner.len());

            for (ii, item) in inner.iter().enumerate() {
                if should_stop(completed) {
                    rows.push(row);
                    break 'outer;
                }
                if completed % every == 0 {
                    on_progress(batched(ProgressInfo::before(completed, total), oi, ii));
                    self.yield_to_host();
                }

                row.push(iteration_fn(o, item, oi, ii));
                completed += 1;
                self.maybe_yield();
            }

            rows.push(row);
            self.yield_to_host();
        }

        on_progress(batched(
            ProgressInfo::finished(completed, total),
            outer.len().saturating_sub(1),
            inner.len().saturating_sub(1),
        ));
        rows
    }

    // ── Yield policy ──────────────────────────────────────────────────────

    fn yield_to_host(&mut self) {
        self.scheduler.yield_now();
        self.last_yield = Instant::now();
    }

    fn maybe_yield(&mut self) {
        if self.last_yield.elapsed() >= self.config.yield_interval {
            self.yield_to_host();
        }
    }
}
