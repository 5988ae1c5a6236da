//! Normal-approximation confidence intervals for a sample mean.
//!
//! The interval is `mean ± z · σ / √n` with σ the population standard
//! deviation.  The approximation is only trustworthy for reasonably large
//! batches (n > 30 is the usual rule of thumb).  Smaller batches are still
//! accepted; their intervals are simply less meaningful.

use crate::{mean, std_dev};

/// Supported confidence levels and their two-sided z-scores.
const Z_TABLE: [(f64, f64); 3] = [(0.90, 1.645), (0.95, 1.96), (0.99, 2.576)];

const DEFAULT_Z: f64 = 1.96;

/// Two-sided z-score for `level`.  Levels other than 0.90, 0.95 and 0.99
/// fall back to the 95 % score.
pub fn z_score(level: f64) -> f64 {
    Z_TABLE
        .iter()
        .find(|(l, _)| (l - level).abs() < 1e-9)
        .map_or(DEFAULT_Z, |&(_, z)| z)
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceInterval {
    pub mean:             f64,
    pub lower:            f64,
    pub upper:            f64,
    /// The level that was requested (not the one the z-score came from).
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    /// Half-width of the interval.
    pub fn margin(&self) -> f64 {
        (self.upper - self.lower) / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

/// Confidence interval for the mean of `xs` at `level`.
///
/// Empty input gives an interval with mean, lower and upper all zero.
pub fn confidence_interval(xs: &[f64], level: f64) -> ConfidenceInterval {
    if xs.is_empty() {
        return ConfidenceInterval { mean: 0.0, lower: 0.0, upper: 0.0, confidence_level: level };
    }

    let m = mean(xs);
    let margin = z_score(level) * std_dev(xs) / (xs.len() as f64).sqrt();

    ConfidenceInterval {
        mean:             m,
        lower:            m - margin,
        upper:            m + margin,
        confidence_level: level,
    }
}
