//! Per-metric summaries over a batch of replication results.

use sk_stats::{ConfidenceInterval, Stats, calculate_stats, confidence_interval, finite_only};

/// How many replications were asked for, and how they ended.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchCounts {
    pub requested: usize,
    pub succeeded: usize,
    pub failed:    usize,
}

/// [`Stats`] plus the 95 % confidence interval of the mean.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MetricSummary {
    pub stats: Stats,
    pub ci95:  ConfidenceInterval,
}

impl MetricSummary {
    #[inline]
    pub fn mean(&self) -> f64 {
        self.stats.mean
    }

    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.stats.std_dev
    }
}

/// Summarise one metric across replications.
pub fn summarize(xs: &[f64]) -> MetricSummary {
    MetricSummary {
        stats: calculate_stats(xs),
        ci95:  confidence_interval(xs, 0.95),
    }
}

/// Like [`summarize`], ignoring `NaN` and `±∞` samples.
pub fn summarize_finite(xs: &[f64]) -> MetricSummary {
    summarize(&finite_only(xs))
}
