//! Unit tests for sk-stats.

use crate::{
    calculate_stats, confidence_interval, finite_only, max, mean, min, percentile, std_dev,
    variance, z_score,
};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Repeating 0..=9 pattern: fixed σ regardless of length (for multiples of 10).
fn sawtooth(n: usize) -> Vec<f64> {
    (0..n).map(|i| (i % 10) as f64).collect()
}

// ── Moments ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod moments {
    use super::*;

    #[test]
    fn mean_of_small_samples() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0);
        assert_eq!(mean(&[42.0]), 42.0);
        assert_eq!(mean(&[-5.0, 0.0, 5.0]), 0.0);
        assert!(approx(mean(&[1.5, 2.5, 3.5]), 2.5));
    }

    #[test]
    fn population_variance() {
        assert_eq!(variance(&[1.0, 2.0, 3.0, 4.0, 5.0]), 2.0);
        assert_eq!(variance(&[5.0]), 0.0);
        assert_eq!(variance(&[7.0, 7.0, 7.0, 7.0]), 0.0);
        assert!(approx(std_dev(&[1.0, 2.0, 3.0, 4.0, 5.0]), 2f64.sqrt()));
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
    }
}

// ── Order statistics ──────────────────────────────────────────────────────────

#[cfg(test)]
mod order {
    use super::*;

    #[test]
    fn percentile_nearest_rank() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&xs, 50.0), 3.0);
        assert_eq!(percentile(&xs, 0.0), 1.0);
        assert_eq!(percentile(&xs, 100.0), 5.0);

        let ten: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(percentile(&ten, 25.0), 3.0);
        // floor(0.75 * 9) = 6 → seventh element.
        assert_eq!(percentile(&ten, 75.0), 7.0);
    }

    #[test]
    fn percentile_sorts_its_input() {
        assert_eq!(percentile(&[5.0, 1.0, 4.0, 2.0, 3.0], 50.0), 3.0);
        assert_eq!(percentile(&[], 50.0), 0.0);
    }

    #[test]
    fn extremes_and_sentinels() {
        assert_eq!(min(&[3.0, 1.0, 4.0, 1.0, 5.0]), 1.0);
        assert_eq!(max(&[3.0, 1.0, 4.0, 1.0, 5.0]), 5.0);
        assert_eq!(min(&[-5.0, -1.0, 0.0, 5.0]), -5.0);
        assert_eq!(min(&[]), f64::INFINITY);
        assert_eq!(max(&[]), f64::NEG_INFINITY);
    }

    #[test]
    fn finite_only_drops_infinities_and_nan() {
        let xs = [1.0, f64::INFINITY, 2.0, f64::NAN, f64::NEG_INFINITY];
        assert_eq!(finite_only(&xs), vec![1.0, 2.0]);
    }
}

// ── calculate_stats ───────────────────────────────────────────────────────────

#[cfg(test)]
mod summary {
    use super::*;
    use crate::Stats;

    #[test]
    fn one_to_hundred() {
        let xs: Vec<f64> = (1..=100).map(f64::from).collect();
        let s = calculate_stats(&xs);
        assert!(approx(s.mean, 50.5));
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 100.0);
        // floor(100 * 0.05) = 5, floor(100 * 0.95) = 95.
        assert_eq!(s.percentile5, 6.0);
        assert_eq!(s.percentile95, 96.0);
        assert!(approx(s.std_dev, std_dev(&xs)));
        assert_eq!(s.range(), 99.0);
    }

    #[test]
    fn single_sample_clamps_percentile_indices() {
        let s = calculate_stats(&[7.0]);
        assert_eq!(s.mean, 7.0);
        assert_eq!(s.std_dev, 0.0);
        assert_eq!(s.percentile5, 7.0);
        assert_eq!(s.percentile95, 7.0);
    }

    #[test]
    fn empty_uses_sentinels() {
        let s = calculate_stats(&[]);
        assert_eq!(s, Stats::EMPTY);
        assert_eq!(s.mean, 0.0);
        assert_eq!(s.min, f64::INFINITY);
        assert_eq!(s.max, f64::NEG_INFINITY);
        assert_eq!(s.range(), 0.0);
    }
}

// ── Confidence intervals ──────────────────────────────────────────────────────

#[cfg(test)]
mod interval {
    use super::*;

    #[test]
    fn z_lookup_and_fallback() {
        assert_eq!(z_score(0.90), 1.645);
        assert_eq!(z_score(0.95), 1.96);
        assert_eq!(z_score(0.99), 2.576);
        assert_eq!(z_score(0.80), 1.96);
    }

    #[test]
    fn symmetric_around_mean() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ci = confidence_interval(&xs, 0.95);
        let margin = 1.96 * 2f64.sqrt() / 5f64.sqrt();
        assert_eq!(ci.mean, 3.0);
        assert!(approx(ci.lower, 3.0 - margin));
        assert!(approx(ci.upper, 3.0 + margin));
        assert!(approx(ci.margin(), margin));
        assert!(ci.contains(3.0));
        assert_eq!(ci.confidence_level, 0.95);
    }

    #[test]
    fn wider_at_higher_level() {
        let xs = sawtooth(50);
        let ci90 = confidence_interval(&xs, 0.90);
        let ci99 = confidence_interval(&xs, 0.99);
        assert!(ci99.margin() > ci90.margin());
    }

    #[test]
    fn shrinks_as_sample_grows() {
        let small = confidence_interval(&sawtooth(100), 0.95);
        let large = confidence_interval(&sawtooth(10_000), 0.95);
        assert!(large.margin() < small.margin());
        // Same σ, 100× the samples → one tenth of the width.
        assert!(approx(large.margin() * 10.0, small.margin()));
    }

    #[test]
    fn empty_is_all_zero() {
        let ci = confidence_interval(&[], 0.99);
        assert_eq!((ci.mean, ci.lower, ci.upper), (0.0, 0.0, 0.0));
        assert_eq!(ci.confidence_level, 0.99);
    }
}
