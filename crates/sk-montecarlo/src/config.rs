use std::time::Duration;

use sk_core::CoreResult;
use sk_core::validate::count;

/// Cadence settings for [`MonteCarloRunner`](crate::MonteCarloRunner).
#[derive(Clone, Debug, PartialEq)]
pub struct RunnerConfig {
    /// Longest stretch of work between two host yields.
    pub yield_interval: Duration,
    /// Report progress before every `progress_every`-th iteration.
    pub progress_every: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            // One 60 Hz frame.
            yield_interval: Duration::from_millis(16),
            progress_every: 5,
        }
    }
}

impl RunnerConfig {
    pub fn validate(&self) -> CoreResult<()> {
        count("progress_every", self.progress_every)?;
        Ok(())
    }
}
