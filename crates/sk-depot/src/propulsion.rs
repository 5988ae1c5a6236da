//! Low-thrust propulsion budget for service drones.
//!
//! Transfers are modelled as Hall-thruster spirals with a linear cost:
//!
//! ```text
//! Δv        = 1 000 m/s per 100 000 km
//! m_prop    = m_dry · (exp(Δv / (Isp · g0)) − 1)      (Tsiolkovsky)
//! t_transit = 12 h (inspector) or 18 h (servicer) per 10 000 km
//! ```

use sk_core::SimTime;

use crate::DroneKind;

/// Standard gravity, m/s².
pub const G0: f64 = 9.806_65;

/// Δv per 100 000 km of travel, m/s.
pub const DELTA_V_PER_100K_KM: f64 = 1_000.0;

/// Propellant on board must exceed the round-trip requirement by this factor.
pub const MISSION_MARGIN: f64 = 1.1;

/// Below this fraction of tank capacity a drone is unavailable and is topped
/// up on its next depot visit.
pub const REFUEL_THRESHOLD: f64 = 0.2;

/// Δv in m/s to cover `distance_km`.
#[inline]
pub fn delta_v(distance_km: f64) -> f64 {
    distance_km / 100_000.0 * DELTA_V_PER_100K_KM
}

/// Propellant mass in kg for `delta_v_ms` on a drone of `dry_mass_kg`.
pub fn propellant_required(delta_v_ms: f64, dry_mass_kg: f64, isp_seconds: f64) -> f64 {
    let exhaust_velocity = isp_seconds * G0;
    dry_mass_kg * ((delta_v_ms / exhaust_velocity).exp() - 1.0)
}

/// Propellant in kg for one leg of `distance_km`.
#[inline]
pub fn leg_propellant(distance_km: f64, dry_mass_kg: f64, isp_seconds: f64) -> f64 {
    propellant_required(delta_v(distance_km), dry_mass_kg, isp_seconds)
}

/// One-way transit time in hours.
#[inline]
pub fn transit_hours(distance_km: f64, kind: DroneKind) -> SimTime {
    distance_km / 10_000.0 * kind.hours_per_10k_km()
}
