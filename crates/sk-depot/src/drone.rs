//! Inspector and servicer drones.
//!
//! A sortie walks the drone through
//!
//! ```text
//! Idle ─▶ InTransit ─▶ Inspecting | Repairing ─▶ Returning ─▶ Refueling ─▶ Idle
//! ```
//!
//! Transitions consume the `Copy` drone and return the next one, or an
//! [`IllegalTransition`] when the drone is in the wrong state.  Propellant and
//! distance bookkeeping is plain accounting and works in any state.

use std::fmt;

use sk_core::{DepotId, DroneId, FailureId, IllegalTransition, TransitionResult};

use crate::propulsion::{self, MISSION_MARGIN, REFUEL_THRESHOLD};

// ── DroneKind ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DroneKind {
    /// Light scout that diagnoses a failed collector.
    Inspector,
    /// Heavy drone that carries out the repair.
    Servicer,
}

impl DroneKind {
    pub fn dry_mass_kg(self) -> f64 {
        match self {
            DroneKind::Inspector => 35.0,
            DroneKind::Servicer => 200.0,
        }
    }

    /// Full tank.
    pub fn propellant_capacity_kg(self) -> f64 {
        match self {
            DroneKind::Inspector => 15.0,
            DroneKind::Servicer => 50.0,
        }
    }

    /// Rated thruster Isp.  Simulations use the scenario's Isp instead.
    pub fn rated_isp_seconds(self) -> f64 {
        match self {
            DroneKind::Inspector => 2_000.0,
            DroneKind::Servicer => 1_800.0,
        }
    }

    pub fn hours_per_10k_km(self) -> f64 {
        match self {
            DroneKind::Inspector => 12.0,
            DroneKind::Servicer => 18.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DroneKind::Inspector => "inspector",
            DroneKind::Servicer => "servicer",
        }
    }
}

impl fmt::Display for DroneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── DroneStatus ───────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DroneStatus {
    Idle,
    InTransit,
    Inspecting,
    Repairing,
    Returning,
    Refueling,
}

impl DroneStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DroneStatus::Idle => "idle",
            DroneStatus::InTransit => "in_transit",
            DroneStatus::Inspecting => "inspecting",
            DroneStatus::Repairing => "repairing",
            DroneStatus::Returning => "returning",
            DroneStatus::Refueling => "refueling",
        }
    }
}

impl fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Drone ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Drone {
    pub id:                   DroneId,
    pub kind:                 DroneKind,
    pub status:               DroneStatus,
    /// Depot the drone is stationed at.
    pub home:                 DepotId,
    pub propellant_kg:        f64,
    pub max_propellant_kg:    f64,
    pub dry_mass_kg:          f64,
    /// Completed repairs (servicers only).
    pub missions_completed:   u32,
    pub distance_traveled_km: f64,
    /// Failure the current sortie is for.
    pub target:               Option<FailureId>,
}

impl Drone {
    /// A fully fuelled idle drone with the standard mass figures of `kind`.
    pub fn new(id: DroneId, kind: DroneKind, home: DepotId) -> Self {
        Self {
            id,
            kind,
            status: DroneStatus::Idle,
            home,
            propellant_kg: kind.propellant_capacity_kg(),
            max_propellant_kg: kind.propellant_capacity_kg(),
            dry_mass_kg: kind.dry_mass_kg(),
            missions_completed: 0,
            distance_traveled_km: 0.0,
            target: None,
        }
    }

    /// Fraction of a full tank left.
    #[inline]
    pub fn propellant_ratio(&self) -> f64 {
        if self.max_propellant_kg > 0.0 {
            self.propellant_kg / self.max_propellant_kg
        } else {
            0.0
        }
    }

    /// Idle with more than the refuel threshold on board.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == DroneStatus::Idle && self.propellant_ratio() > REFUEL_THRESHOLD
    }

    /// `true` if the tank covers a round trip of `2 · distance_km` with the
    /// mission margin.
    pub fn can_complete_mission(&self, distance_km: f64, isp_seconds: f64) -> bool {
        let required = propulsion::leg_propellant(2.0 * distance_km, self.dry_mass_kg, isp_seconds);
        self.propellant_kg >= required * MISSION_MARGIN
    }

    /// Burn propellant for one leg; the tank never goes negative.
    pub fn consume_propellant(self, distance_km: f64, isp_seconds: f64) -> Self {
        let used = propulsion::leg_propellant(distance_km, self.dry_mass_kg, isp_seconds);
        Self {
            propellant_kg: (self.propellant_kg - used).max(0.0),
            distance_traveled_km: self.distance_traveled_km + distance_km,
            ..self
        }
    }

    /// Propellant needed to fill the tank.
    #[inline]
    pub fn propellant_deficit_kg(&self) -> f64 {
        (self.max_propellant_kg - self.propellant_kg).max(0.0)
    }

    fn require(self, expected: DroneStatus, action: &'static str) -> TransitionResult<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(IllegalTransition::new(self.id, self.status.as_str(), action))
        }
    }

    /// `Idle → InTransit` towards `target`.
    pub fn dispatch(self, target: FailureId) -> TransitionResult<Self> {
        let d = self.require(DroneStatus::Idle, "dispatch")?;
        Ok(Self { status: DroneStatus::InTransit, target: Some(target), ..d })
    }

    /// `InTransit → Inspecting` (inspector) or `→ Repairing` (servicer).
    pub fn arrive(self) -> TransitionResult<Self> {
        let d = self.require(DroneStatus::InTransit, "arrive")?;
        let status = match d.kind {
            DroneKind::Inspector => DroneStatus::Inspecting,
            DroneKind::Servicer => DroneStatus::Repairing,
        };
        Ok(Self { status, ..d })
    }

    /// `Inspecting → Returning`.
    pub fn finish_inspection(self) -> TransitionResult<Self> {
        let d = self.require(DroneStatus::Inspecting, "finish inspection")?;
        Ok(Self { status: DroneStatus::Returning, target: None, ..d })
    }

    /// `Repairing → Returning`, counting the mission.
    pub fn complete_repair(self) -> TransitionResult<Self> {
        let d = self.require(DroneStatus::Repairing, "complete repair")?;
        Ok(Self {
            status: DroneStatus::Returning,
            missions_completed: d.missions_completed + 1,
            target: None,
            ..d
        })
    }

    /// `Returning → Refueling` on arrival at the depot.
    pub fn dock(self) -> TransitionResult<Self> {
        let d = self.require(DroneStatus::Returning, "dock")?;
        Ok(Self { status: DroneStatus::Refueling, ..d })
    }

    /// `Refueling → Idle`, taking on `propellant_kg` (clamped to the tank).
    pub fn refuel(self, propellant_kg: f64) -> TransitionResult<Self> {
        let d = self.require(DroneStatus::Refueling, "refuel")?;
        Ok(Self {
            status: DroneStatus::Idle,
            propellant_kg: (d.propellant_kg + propellant_kg.max(0.0)).min(d.max_propellant_kg),
            ..d
        })
    }
}

// ── DroneStats ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DroneStats {
    pub total_drones:         usize,
    pub inspectors:           usize,
    pub servicers:            usize,
    pub available:            usize,
    pub missions_completed:   u32,
    pub distance_traveled_km: f64,
    pub propellant_on_board:  f64,
}

pub fn drone_stats(drones: &[Drone]) -> DroneStats {
    let inspectors = drones.iter().filter(|d| d.kind == DroneKind::Inspector).count();
    DroneStats {
        total_drones: drones.len(),
        inspectors,
        servicers: drones.len() - inspectors,
        available: drones.iter().filter(|d| d.is_available()).count(),
        missions_completed: drones.iter().map(|d| d.missions_completed).sum(),
        distance_traveled_km: drones.iter().map(|d| d.distance_traveled_km).sum(),
        propellant_on_board: drones.iter().map(|d| d.propellant_kg).sum(),
    }
}
