use sk_core::time::days_to_hours;
use sk_core::validate::{in_range, non_negative, positive};
use sk_core::{CoreResult, SimTime};
use sk_stochastic::{Annulus, FailureParams};

/// One depot-logistics scenario.
///
/// With the `serde` feature, missing fields take their [`Default`] values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DepotLogisticsConfig {
    /// Distance between neighbouring depots, both along a ring and between
    /// rings.
    pub depot_spacing_km:         f64,
    pub inspector_count:          usize,
    pub servicer_count:           usize,
    pub swarm_size_millions:      f64,
    /// Failures per collector per year.
    pub failure_rate_per_year:    f64,
    pub inspector_range_km:       f64,
    pub servicer_range_km:        f64,
    /// Reported with the scenario; dispatch is limited by tank capacity.
    pub propellant_budget_kg:     f64,
    /// Specific impulse used for every propellant calculation.
    pub isp_seconds:              f64,
    pub simulation_duration_days: f64,
    /// Base seed; replication `i` uses `seed + i`.  `None` seeds from the
    /// clock.
    pub seed:                     Option<u64>,
}

impl Default for DepotLogisticsConfig {
    fn default() -> Self {
        Self {
            depot_spacing_km:         200_000.0,
            inspector_count:          10_000,
            servicer_count:           1_000,
            swarm_size_millions:      5.0,
            failure_rate_per_year:    0.02,
            inspector_range_km:       300_000.0,
            servicer_range_km:        400_000.0,
            propellant_budget_kg:     20.0,
            isp_seconds:              2_000.0,
            simulation_duration_days: 365.0,
            seed:                     None,
        }
    }
}

impl DepotLogisticsConfig {
    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed: Some(seed), ..self }
    }

    pub fn duration_hours(&self) -> SimTime {
        days_to_hours(self.simulation_duration_days)
    }

    /// The band depots are laid out over and failures are drawn from.
    pub fn region(&self) -> Annulus {
        Annulus::swarm_band()
    }

    pub fn failure_params(&self) -> FailureParams {
        FailureParams {
            swarm_size_millions:   self.swarm_size_millions,
            failure_rate_per_year: self.failure_rate_per_year,
            horizon_hours:         self.duration_hours(),
            region:                self.region(),
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        positive("depot_spacing_km", self.depot_spacing_km)?;
        non_negative("swarm_size_millions", self.swarm_size_millions)?;
        in_range("failure_rate_per_year", self.failure_rate_per_year, 0.0, 1.0)?;
        positive("inspector_range_km", self.inspector_range_km)?;
        positive("servicer_range_km", self.servicer_range_km)?;
        non_negative("propellant_budget_kg", self.propellant_budget_kg)?;
        positive("isp_seconds", self.isp_seconds)?;
        positive("simulation_duration_days", self.simulation_duration_days)?;
        Ok(())
    }
}
