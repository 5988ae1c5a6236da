//! `sk-stats` — descriptive statistics for Monte Carlo result sets.
//!
//! Every function here is total: empty input never errors.  Instead it maps to
//! a defined sentinel so aggregation code never needs an `Option` check:
//!
//! | Function                | Empty input result                  |
//! |-------------------------|-------------------------------------|
//! | [`mean`], [`variance`]  | `0.0`                               |
//! | [`std_dev`]             | `0.0`                               |
//! | [`percentile`]          | `0.0`                               |
//! | [`min`] / [`max`]       | `+∞` / `-∞`                         |
//! | [`calculate_stats`]     | zeros, with `min = +∞`, `max = -∞`  |
//! | [`confidence_interval`] | zero mean and bounds                |
//!
//! Variance is the *population* variance (divide by `n`), matching the way
//! historical batch summaries were computed.

pub mod interval;
pub mod summary;

#[cfg(test)]
mod tests;

pub use interval::{ConfidenceInterval, confidence_interval, z_score};
pub use summary::{Stats, calculate_stats};

/// Arithmetic mean.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population variance (`Σ(x - μ)² / n`).
pub fn variance(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let m = mean(xs);
    xs.iter().map(|x| (x - m).powi(2)).sum::<f64>() / xs.len() as f64
}

/// Population standard deviation.
pub fn std_dev(xs: &[f64]) -> f64 {
    variance(xs).sqrt()
}

/// Nearest-rank percentile, `p` in `[0, 100]`.
///
/// The sample is sorted ascending and the element at
/// `floor(p / 100 * (n - 1))` is returned; no interpolation.
pub fn percentile(xs: &[f64], p: f64) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let sorted = sorted_copy(xs);
    let idx = ((p / 100.0) * (sorted.len() - 1) as f64).floor().max(0.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

pub fn min(xs: &[f64]) -> f64 {
    xs.iter().copied().fold(f64::INFINITY, f64::min)
}

pub fn max(xs: &[f64]) -> f64 {
    xs.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// Drop non-finite samples (`NaN`, `±∞`) before aggregation.
///
/// Cost-per-kg style metrics are `∞` for runs that delivered nothing; those
/// runs are still counted elsewhere but would poison a mean.
pub fn finite_only(xs: &[f64]) -> Vec<f64> {
    xs.iter().copied().filter(|x| x.is_finite()).collect()
}

pub(crate) fn sorted_copy(xs: &[f64]) -> Vec<f64> {
    let mut sorted = xs.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}
