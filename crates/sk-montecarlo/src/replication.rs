//! Seeded, failure-isolated replications.
//!
//! Each replication runs inside `catch_unwind` and may also return `Err`.
//! Either way the failure is recorded as a [`ReplicationFailure`] and the
//! batch moves on; one bad seed never takes down the other replications.

use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

use sk_core::replication_seed;
use tracing::{debug, info, warn};

use crate::{BatchCounts, HostScheduler, MonteCarloError, MonteCarloResult, MonteCarloRunner, ProgressInfo};

/// A replication that panicked or returned an error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReplicationFailure {
    pub index:  usize,
    pub seed:   u64,
    pub reason: String,
}

/// Outcome of a replication batch: successful results in index order plus
/// the failures that were skipped.
#[derive(Clone, Debug)]
pub struct ReplicationBatch<T> {
    pub results:   Vec<T>,
    pub failures:  Vec<ReplicationFailure>,
    /// Replications asked for (may exceed `attempted()` after a stop).
    pub requested: usize,
}

impl<T> ReplicationBatch<T> {
    pub(crate) fn from_outcomes(
        requested: usize,
        outcomes:  impl IntoIterator<Item = Result<T, ReplicationFailure>>,
    ) -> Self {
        let mut results = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(v) => results.push(v),
                Err(f) => failures.push(f),
            }
        }
        Self { results, failures, requested }
    }

    /// Replications that actually ran.
    pub fn attempted(&self) -> usize {
        self.results.len() + self.failures.len()
    }

    pub fn counts(&self) -> BatchCounts {
        BatchCounts {
            requested: self.requested,
            succeeded: self.results.len(),
            failed:    self.failures.len(),
        }
    }

    /// Results, or an error when nothing succeeded.
    pub fn require_success(self) -> MonteCarloResult<(Vec<T>, BatchCounts)> {
        let counts = self.counts();
        if !self.results.is_empty() {
            return Ok((self.results, counts));
        }
        match self.failures.into_iter().next() {
            Some(first) => Err(MonteCarloError::AllReplicationsFailed {
                total: counts.failed,
                first: first.reason,
            }),
            None => Err(MonteCarloError::NoReplications),
        }
    }
}

impl<S: HostScheduler> MonteCarloRunner<S> {
    /// Run `total` replications, replication `i` seeded with
    /// `base_seed + i`, isolating panics and `Err` returns.
    pub fn run_replications<T, E, F, P, C>(
        &mut self,
        total:       usize,
        base_seed:   u64,
        mut f:       F,
        on_progress: P,
        should_stop: C,
    ) -> ReplicationBatch<T>
    where
        E: Display,
        F: FnMut(usize, u64) -> Result<T, E>,
        P: FnMut(ProgressInfo),
        C: FnMut(usize) -> bool,
    {
        let outcomes = self.run(
            total,
            |i| run_isolated(i, replication_seed(base_seed, i), &mut f),
            on_progress,
            should_stop,
        );
        let batch = ReplicationBatch::from_outcomes(total, outcomes);
        let counts = batch.counts();
        info!(
            requested = counts.requested,
            succeeded = counts.succeeded,
            failed = counts.failed,
            base_seed,
            "replication batch complete"
        );
        batch
    }
}

/// Run one replication behind a panic boundary.
pub(crate) fn run_isolated<T, E, F>(index: usize, seed: u64, f: F) -> Result<T, ReplicationFailure>
where
    E: Display,
    F: FnOnce(usize, u64) -> Result<T, E>,
{
    debug!(index, seed, "replication start");
    let reason = match panic::catch_unwind(AssertUnwindSafe(|| f(index, seed))) {
        Ok(Ok(value)) => {
            debug!(index, seed, "replication done");
            return Ok(value);
        }
        Ok(Err(e)) => e.to_string(),
        Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
    };
    warn!(index, seed, %reason, "replication failed; continuing batch");
    Err(ReplicationFailure { index, seed, reason })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
