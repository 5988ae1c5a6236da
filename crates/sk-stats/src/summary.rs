//! One-pass bundle of the summary statistics reported per metric.

use crate::sorted_copy;

/// Mean, spread, extremes and tail percentiles of one metric.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    pub mean:         f64,
    pub std_dev:      f64,
    pub min:          f64,
    pub max:          f64,
    pub percentile5:  f64,
    pub percentile95: f64,
}

impl Stats {
    /// Summary of an empty sample.
    pub const EMPTY: Stats = Stats {
        mean:         0.0,
        std_dev:      0.0,
        min:          f64::INFINITY,
        max:          f64::NEG_INFINITY,
        percentile5:  0.0,
        percentile95: 0.0,
    };

    /// `max - min`, or `0.0` for an empty sample.
    pub fn range(&self) -> f64 {
        if self.min > self.max { 0.0 } else { self.max - self.min }
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Compute [`Stats`] for `xs`.
///
/// The 5th and 95th percentiles index the sorted sample at `floor(n * 0.05)`
/// and `floor(n * 0.95)`, clamped to the last element.  This differs from
/// [`percentile`](crate::percentile), which scales by `n - 1`; both
/// conventions are kept so historical reports stay comparable.
pub fn calculate_stats(xs: &[f64]) -> Stats {
    if xs.is_empty() {
        return Stats::EMPTY;
    }

    let sorted = sorted_copy(xs);
    let n = sorted.len();
    let last = n - 1;
    let mean = xs.iter().sum::<f64>() / n as f64;
    let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

    let p5_idx = ((n as f64 * 0.05).floor() as usize).min(last);
    let p95_idx = ((n as f64 * 0.95).floor() as usize).min(last);

    Stats {
        mean,
        std_dev: var.sqrt(),
        min: sorted[0],
        max: sorted[last],
        percentile5: sorted[p5_idx],
        percentile95: sorted[p95_idx],
    }
}
