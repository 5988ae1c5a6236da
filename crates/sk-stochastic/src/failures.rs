//! Collector failure injection for a ring-shaped swarm.
//!
//! Failures across the whole swarm form one Poisson process with
//!
//! ```text
//! λ = swarm_size × failure_rate_per_year / 8760   (failures per hour)
//! ```
//!
//! For each arrival the generator draws, in this order: radius, angle,
//! priority roll.  That fixed order is what makes a seed reproduce the list.

use std::fmt;

use sk_core::time::{DAYS_PER_YEAR, HOURS_PER_YEAR};
use sk_core::validate::{non_negative, positive};
use sk_core::{CoreResult, FailureId, SeededRandom, SimTime};

use crate::{Annulus, Categorical, PoissonProcess, PolarPoint};

// ── Priority ──────────────────────────────────────────────────────────────────

/// Service urgency of a failure.  Lower rank is more urgent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    Critical = 1,
    Standard = 2,
    Low      = 3,
}

impl Priority {
    /// Numeric rank: 1 (critical) to 3 (low).
    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// 10 % critical, 60 % standard, 30 % low.
    pub fn distribution() -> Categorical<Priority> {
        Categorical::from_parts(
            vec![0.1, 0.7, 1.0],
            vec![Priority::Critical, Priority::Standard, Priority::Low],
        )
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Critical => "critical",
            Priority::Standard => "standard",
            Priority::Low      => "low",
        };
        f.write_str(name)
    }
}

// ── Parameters and events ─────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FailureParams {
    /// Collectors in the swarm, in millions.
    pub swarm_size_millions:  f64,
    /// Failures per collector per year.
    pub failure_rate_per_year: f64,
    /// Generation stops at this simulated time.
    pub horizon_hours:        SimTime,
    /// Where failures can occur.
    pub region:               Annulus,
}

impl FailureParams {
    pub fn validate(&self) -> CoreResult<()> {
        non_negative("swarm_size_millions", self.swarm_size_millions)?;
        non_negative("failure_rate_per_year", self.failure_rate_per_year)?;
        positive("horizon_hours", self.horizon_hours)?;
        positive("region.inner_km", self.region.inner_km)?;
        positive("region.width_km", self.region.width_km())?;
        Ok(())
    }

    /// Swarm-wide failure process.
    pub fn process(&self) -> PoissonProcess {
        PoissonProcess::from_population(
            self.swarm_size_millions * 1_000_000.0,
            self.failure_rate_per_year,
            HOURS_PER_YEAR,
        )
    }
}

/// One collector failure, as generated (before any service assignment).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectorFailureEvent {
    pub id:          FailureId,
    pub detected_at: SimTime,
    pub position:    PolarPoint,
    pub priority:    Priority,
}

// ── Generation ────────────────────────────────────────────────────────────────

/// Every failure detected in `[0, params.horizon_hours)`, in time order.
///
/// Ids are assigned densely from 0 in detection order.
pub fn generate_failures(params: &FailureParams, rng: &mut SeededRandom) -> Vec<CollectorFailureEvent> {
    let process = params.process();
    let priorities = Priority::distribution();
    let mut out = Vec::with_capacity(process.expected_count(params.horizon_hours).max(0.0) as usize);

    let mut arrivals = process.iter(params.horizon_hours, rng);
    while let Some(detected_at) = arrivals.next_arrival() {
        let rng = arrivals.rng();
        let position = params.region.sample(rng);
        let priority = priorities.sample(rng);
        out.push(CollectorFailureEvent {
            id: FailureId(out.len() as u32),
            detected_at,
            position,
            priority,
        });
    }
    out
}

/// Mean failures per day across the swarm.
pub fn expected_failures_per_day(swarm_size_millions: f64, failure_rate_per_year: f64) -> f64 {
    swarm_size_millions * 1_000_000.0 * failure_rate_per_year / DAYS_PER_YEAR
}

/// Mean failures over `days`.
pub fn expected_total_failures(swarm_size_millions: f64, failure_rate_per_year: f64, days: f64) -> f64 {
    expected_failures_per_day(swarm_size_millions, failure_rate_per_year) * days
}

/// Most urgent first; equal priorities by detection time.
pub fn sort_by_priority(failures: &mut [CollectorFailureEvent]) {
    failures.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then(a.detected_at.total_cmp(&b.detected_at))
    });
}
