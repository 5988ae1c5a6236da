//! Rayon-backed replication batch.

use std::fmt::Display;
use std::sync::Mutex;

use rayon::prelude::*;
use sk_core::replication_seed;
use tracing::info;

use crate::replication::run_isolated;
use crate::{ProgressInfo, ReplicationBatch};

/// Run `total` replications on Rayon's thread pool.
///
/// Results come back in index order (the indexed parallel iterator keeps
/// positions), so a batch is bit-for-bit identical to the sequential one.
/// `on_progress` is called once per finished replication under a lock, which
/// keeps the reported count monotone; the last report is 100 %.
/// There is no stop predicate: every replication runs.
pub fn run_replications_parallel<T, E, F, P>(
    total:       usize,
    base_seed:   u64,
    f:           F,
    on_progress: P,
) -> ReplicationBatch<T>
where
    T: Send,
    E: Display,
    F: Fn(usize, u64) -> Result<T, E> + Sync,
    P: FnMut(ProgressInfo) + Send,
{
    let progress = Mutex::new((0usize, on_progress));

    let outcomes: Vec<_> = (0..total)
        .into_par_iter()
        .map(|i| {
            let outcome = run_isolated(i, replication_seed(base_seed, i), &f);
            // A poisoned lock only means a progress callback panicked; the
            // replication result is still good.
            if let Ok(mut guard) = progress.lock() {
                let (done, report) = &mut *guard;
                *done += 1;
                report(ProgressInfo::finished(*done, total));
            }
            outcome
        })
        .collect();

    let batch = ReplicationBatch::from_outcomes(total, outcomes);
    let counts = batch.counts();
    info!(
        requested = counts.requested,
        succeeded = counts.succeeded,
        failed = counts.failed,
        base_seed,
        "parallel replication batch complete"
    );
    batch
}
