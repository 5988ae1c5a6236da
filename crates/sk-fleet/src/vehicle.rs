//! Vehicle state machine.
//!
//! A [`Vehicle`] is a small `Copy` record.  Every transition consumes the
//! vehicle and returns the next one, or an [`IllegalTransition`] if the
//! vehicle is in the wrong state.  The model applies the usual no-op policy:
//!
//! ```rust,ignore
//! let v = v.start_loading().unwrap_or(v);
//! ```

use std::fmt;

use sk_core::{IllegalTransition, SimTime, TransitionResult, VehicleId};

// ── VehicleStatus ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VehicleStatus {
    Idle,
    Loading,
    InTransit,
    Unloading,
    Returning,
    /// Absorbing: no transition leaves `Failed`.
    Failed,
}

impl VehicleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Idle => "idle",
            VehicleStatus::Loading => "loading",
            VehicleStatus::InTransit => "in_transit",
            VehicleStatus::Unloading => "unloading",
            VehicleStatus::Returning => "returning",
            VehicleStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id:                  VehicleId,
    pub status:              VehicleStatus,
    pub payload_capacity_kg: f64,
    pub current_payload_kg:  f64,
    pub total_delivered_kg:  f64,
    pub trips:               u32,
    /// Hours spent in transit or returning.
    pub hours_operational:   f64,
    pub failure_time:        Option<SimTime>,
}

impl Vehicle {
    pub fn new(id: VehicleId, payload_capacity_kg: f64) -> Self {
        Self {
            id,
            status: VehicleStatus::Idle,
            payload_capacity_kg,
            current_payload_kg: 0.0,
            total_delivered_kg: 0.0,
            trips: 0,
            hours_operational: 0.0,
            failure_time: None,
        }
    }

    #[inline]
    pub fn is_operational(&self) -> bool {
        self.status != VehicleStatus::Failed
    }

    fn require(self, expected: VehicleStatus, action: &'static str) -> TransitionResult<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(IllegalTransition::new(self.id, self.status.as_str(), action))
        }
    }

    /// `Idle → Loading`.
    pub fn start_loading(self) -> TransitionResult<Self> {
        let v = self.require(VehicleStatus::Idle, "start loading")?;
        Ok(Self { status: VehicleStatus::Loading, ..v })
    }

    /// Take on `payload_kg`, clamped to capacity.  Stays `Loading`.
    pub fn complete_loading(self, payload_kg: f64) -> TransitionResult<Self> {
        let v = self.require(VehicleStatus::Loading, "complete loading")?;
        Ok(Self { current_payload_kg: payload_kg.min(v.payload_capacity_kg), ..v })
    }

    /// `Loading → InTransit`.
    pub fn start_transit(self) -> TransitionResult<Self> {
        let v = self.require(VehicleStatus::Loading, "start transit")?;
        Ok(Self { status: VehicleStatus::InTransit, ..v })
    }

    /// Book the outbound leg.  Stays `InTransit`.
    pub fn complete_transit(self, hours: f64) -> TransitionResult<Self> {
        let v = self.require(VehicleStatus::InTransit, "complete transit")?;
        Ok(Self { hours_operational: v.hours_operational + hours, ..v })
    }

    /// `InTransit → Unloading`.
    pub fn start_unloading(self) -> TransitionResult<Self> {
        let v = self.require(VehicleStatus::InTransit, "start unloading")?;
        Ok(Self { status: VehicleStatus::Unloading, ..v })
    }

    /// Deliver the payload and count the trip.  Stays `Unloading`.
    pub fn complete_unloading(self) -> TransitionResult<Self> {
        let v = self.require(VehicleStatus::Unloading, "complete unloading")?;
        Ok(Self {
            total_delivered_kg: v.total_delivered_kg + v.current_payload_kg,
            current_payload_kg: 0.0,
            trips: v.trips + 1,
            ..v
        })
    }

    /// `Unloading → Returning`.
    pub fn start_return(self) -> TransitionResult<Self> {
        let v = self.require(VehicleStatus::Unloading, "start return")?;
        Ok(Self { status: VehicleStatus::Returning, ..v })
    }

    /// `Returning → Idle`, booking the return leg.
    pub fn complete_return(self, hours: f64) -> TransitionResult<Self> {
        let v = self.require(VehicleStatus::Returning, "complete return")?;
        Ok(Self {
            status: VehicleStatus::Idle,
            hours_operational: v.hours_operational + hours,
            ..v
        })
    }

    /// Any operational state `→ Failed`.
    pub fn fail(self, time: SimTime) -> TransitionResult<Self> {
        if !self.is_operational() {
            return Err(IllegalTransition::new(self.id, self.status.as_str(), "fail"));
        }
        Ok(Self { status: VehicleStatus::Failed, failure_time: Some(time), ..self })
    }
}

/// `count` idle vehicles with ids `0..count`.
pub fn create_fleet(count: usize, payload_capacity_kg: f64) -> Vec<Vehicle> {
    (0..count)
        .map(|i| Vehicle::new(VehicleId(i as u32), payload_capacity_kg))
        .collect()
}

/// First idle vehicle, if any.
pub fn idle_vehicle(fleet: &[Vehicle]) -> Option<&Vehicle> {
    fleet.iter().find(|v| v.status == VehicleStatus::Idle)
}

// ── FleetStats ────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FleetStats {
    pub total_vehicles:        usize,
    pub operational_vehicles:  usize,
    pub failed_vehicles:       usize,
    pub total_delivered_kg:    f64,
    pub total_trips:           u32,
    pub avg_trips_per_vehicle: f64,
}

pub fn fleet_stats(fleet: &[Vehicle]) -> FleetStats {
    let operational = fleet.iter().filter(|v| v.is_operational()).count();
    let total_trips: u32 = fleet.iter().map(|v| v.trips).sum();
    FleetStats {
        total_vehicles: fleet.len(),
        operational_vehicles: operational,
        failed_vehicles: fleet.len() - operational,
        total_delivered_kg: fleet.iter().map(|v| v.total_delivered_kg).sum(),
        total_trips,
        avg_trips_per_vehicle: if fleet.is_empty() {
            0.0
        } else {
            f64::from(total_trips) / fleet.len() as f64
        },
    }
}
