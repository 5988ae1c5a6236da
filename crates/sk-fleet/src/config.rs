use sk_core::time::years_to_hours;
use sk_core::validate::{count, in_range, positive};
use sk_core::{CoreResult, SimTime};

/// One fleet scenario.
///
/// With the `serde` feature, missing fields take their [`Default`] values,
/// so a JSON file only needs to name what it changes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FleetConfig {
    pub vehicle_count:          usize,
    pub payload_capacity_kg:    f64,
    pub mission_duration_years: f64,
    /// Probability per vehicle-year of a permanent failure.
    pub annual_failure_rate:    f64,
    pub budget_dollars:         f64,
    /// Base seed; replication `i` uses `seed + i`.  `None` seeds from the
    /// clock.
    pub seed:                   Option<u64>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            vehicle_count:          10,
            payload_capacity_kg:    200_000.0,
            mission_duration_years: 15.0,
            annual_failure_rate:    0.03,
            budget_dollars:         2_000_000_000.0,
            seed:                   None,
        }
    }
}

impl FleetConfig {
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed: Some(seed), ..self }
    }

    pub fn mission_hours(&self) -> SimTime {
        years_to_hours(self.mission_duration_years)
    }

    pub fn validate(&self) -> CoreResult<()> {
        count("vehicle_count", self.vehicle_count)?;
        positive("payload_capacity_kg", self.payload_capacity_kg)?;
        positive("mission_duration_years", self.mission_duration_years)?;
        in_range("annual_failure_rate", self.annual_failure_rate, 0.0, 1.0)?;
        positive("budget_dollars", self.budget_dollars)?;
        Ok(())
    }
}
