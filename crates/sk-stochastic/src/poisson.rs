//! Homogeneous Poisson process.

use sk_core::{SeededRandom, SimTime};

/// Arrivals at a constant `rate` (events per simulated hour).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoissonProcess {
    pub rate: f64,
}

impl PoissonProcess {
    pub fn new(rate: f64) -> Self {
        Self { rate }
    }

    /// Aggregate process of `population` independent units, each failing (or
    /// arriving) `per_unit_rate` times per period of `period_hours`.
    ///
    /// λ = population × per_unit_rate / period_hours.
    pub fn from_population(population: f64, per_unit_rate: f64, period_hours: f64) -> Self {
        Self::new(population * per_unit_rate / period_hours)
    }

    /// Expected number of arrivals in `[0, horizon)`.
    pub fn expected_count(&self, horizon: SimTime) -> f64 {
        self.rate * horizon
    }

    /// Lazily draw arrival times in `[0, horizon)`.
    ///
    /// Each step consumes exactly one `next_exponential` draw; callers that
    /// draw event attributes between steps interleave with the same stream.
    pub fn iter<'r>(&self, horizon: SimTime, rng: &'r mut SeededRandom) -> Arrivals<'r> {
        Arrivals { rate: self.rate, horizon, now: 0.0, rng }
    }

    /// All arrival times in `[0, horizon)`, ascending.
    pub fn arrivals(&self, horizon: SimTime, rng: &mut SeededRandom) -> Vec<SimTime> {
        let mut out = Vec::with_capacity(self.expected_count(horizon).max(0.0) as usize);
        let mut iter = self.iter(horizon, rng);
        while let Some(t) = iter.next_arrival() {
            out.push(t);
        }
        out
    }
}

/// Cursor over the arrivals of one [`PoissonProcess`].
///
/// Not an `Iterator` because the caller usually needs the same `rng` between
/// arrivals; use [`next_arrival`](Self::next_arrival) and
/// [`rng`](Self::rng).
pub struct Arrivals<'r> {
    rate:    f64,
    horizon: SimTime,
    now:     SimTime,
    rng:     &'r mut SeededRandom,
}

impl Arrivals<'_> {
    /// Advance to the next arrival, or `None` once the horizon is reached.
    pub fn next_arrival(&mut self) -> Option<SimTime> {
        // A zero or negative rate never produces an arrival; checking here
        // also keeps `0/0 = NaN` gaps out of the accumulator.
        if !(self.rate > 0.0) || !(self.now < self.horizon) {
            return None;
        }
        self.now += self.rng.next_exponential(self.rate);
        if self.now >= self.horizon {
            self.now = self.horizon;
            return None;
        }
        Some(self.now)
    }

    /// The underlying stream, for drawing per-arrival attributes.
    pub fn rng(&mut self) -> &mut SeededRandom {
        self.rng
    }
}
