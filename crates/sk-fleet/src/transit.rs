//! Cycle-time formulas for a source → destination → source round trip.

use sk_core::{HOURS_PER_YEAR, SimTime};

/// Timing parameters for Earth–NEA cargo runs.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TransitParams {
    /// Outbound time for an empty vehicle.
    pub base_transit_hours:         f64,
    /// Extra outbound hours per 100,000 kg of payload.
    pub hours_per_hundred_tonnes:   f64,
    /// Empty return leg.
    pub return_transit_hours:       f64,
    pub loading_rate_kg_per_hour:   f64,
    pub unloading_rate_kg_per_hour: f64,
}

impl Default for TransitParams {
    fn default() -> Self {
        Self {
            base_transit_hours:         6.0 * 30.0 * 24.0,
            hours_per_hundred_tonnes:   30.0 * 24.0,
            return_transit_hours:       4.0 * 30.0 * 24.0,
            loading_rate_kg_per_hour:   1_000.0,
            unloading_rate_kg_per_hour: 1_500.0,
        }
    }
}

impl TransitParams {
    /// Outbound leg; heavier payloads fly slower trajectories.
    pub fn transit_time(&self, payload_kg: f64) -> SimTime {
        self.base_transit_hours + payload_kg / 100_000.0 * self.hours_per_hundred_tonnes
    }

    pub fn loading_time(&self, payload_kg: f64) -> SimTime {
        payload_kg / self.loading_rate_kg_per_hour
    }

    pub fn unloading_time(&self, payload_kg: f64) -> SimTime {
        payload_kg / self.unloading_rate_kg_per_hour
    }

    pub fn return_time(&self) -> SimTime {
        self.return_transit_hours
    }

    pub fn round_trip_time(&self, payload_kg: f64) -> SimTime {
        self.transit_time(payload_kg)
            + self.loading_time(payload_kg)
            + self.unloading_time(payload_kg)
            + self.return_time()
    }

    /// Steady-state trips per 365-day year.
    pub fn trips_per_year(&self, payload_kg: f64) -> f64 {
        HOURS_PER_YEAR / self.round_trip_time(payload_kg)
    }
}
