//! Weighted choice among a fixed set of outcomes.

use sk_core::validate::non_negative;
use sk_core::{ConfigError, CoreResult, SeededRandom};

/// A discrete distribution sampled with one uniform draw.
///
/// Weights are normalised into cumulative thresholds at construction; a roll
/// `u` selects the first outcome whose threshold exceeds it.  Any rounding
/// slack at the top falls through to the last outcome.
#[derive(Clone, Debug)]
pub struct Categorical<T> {
    thresholds: Vec<f64>,
    outcomes:   Vec<T>,
}

impl<T: Copy> Categorical<T> {
    pub fn new(weighted: &[(T, f64)]) -> CoreResult<Self> {
        if weighted.is_empty() {
            return Err(ConfigError::Empty { field: "categorical outcomes" });
        }
        let mut total = 0.0;
        for &(_, w) in weighted {
            total += non_negative("categorical weight", w)?;
        }
        if total <= 0.0 {
            return Err(ConfigError::NotPositive { field: "categorical weight sum", value: total });
        }

        let mut acc = 0.0;
        let thresholds = weighted
            .iter()
            .map(|&(_, w)| {
                acc += w / total;
                acc
            })
            .collect();
        let outcomes = weighted.iter().map(|&(o, _)| o).collect();
        Ok(Self { thresholds, outcomes })
    }

    /// Build from already-cumulative thresholds, used verbatim.
    ///
    /// Thresholds must be non-decreasing and end at `1.0`.  Use this when
    /// exact cut points matter (e.g. `0.1, 0.7, 1.0`), since normalising
    /// weights can move a cut by an ulp.
    pub fn from_cumulative(cumulative: &[(T, f64)]) -> CoreResult<Self> {
        if cumulative.is_empty() {
            return Err(ConfigError::Empty { field: "categorical outcomes" });
        }
        let mut prev = 0.0;
        for &(_, t) in cumulative {
            let t = non_negative("categorical threshold", t)?;
            if t < prev {
                return Err(ConfigError::Invalid(format!(
                    "categorical thresholds must be non-decreasing ({t} after {prev})"
                )));
            }
            prev = t;
        }
        if prev != 1.0 {
            return Err(ConfigError::OutOfRange {
                field: "last categorical threshold",
                value: prev,
                min:   1.0,
                max:   1.0,
            });
        }
        Ok(Self {
            thresholds: cumulative.iter().map(|&(_, t)| t).collect(),
            outcomes:   cumulative.iter().map(|&(o, _)| o).collect(),
        })
    }

    /// Known-good cumulative table, skipping validation.
    pub(crate) fn from_parts(thresholds: Vec<f64>, outcomes: Vec<T>) -> Self {
        debug_assert_eq!(thresholds.len(), outcomes.len());
        Self { thresholds, outcomes }
    }

    /// Outcome for a given roll in `[0, 1)`.
    pub fn pick(&self, roll: f64) -> T {
        let idx = self
            .thresholds
            .iter()
            .position(|&t| roll < t)
            .unwrap_or(self.outcomes.len() - 1);
        self.outcomes[idx]
    }

    /// Draw one outcome.
    pub fn sample(&self, rng: &mut SeededRandom) -> T {
        self.pick(rng.next_f64())
    }

    /// Probability mass of each outcome, in declaration order.
    pub fn probabilities(&self) -> Vec<f64> {
        let mut prev = 0.0;
        self.thresholds
            .iter()
            .map(|&t| {
                let p = t - prev;
                prev = t;
                p
            })
            .collect()
    }
}
