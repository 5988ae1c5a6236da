//! Depot records, the ring layout and drone stationing.

use std::f64::consts::PI;

use sk_core::{DepotId, DroneId};
use sk_stochastic::{Annulus, PolarPoint};

use crate::{Drone, DroneKind};

/// Propellant each depot starts with, kg.
pub const INITIAL_INVENTORY_KG: f64 = 100_000.0;

// ── Depot ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Depot {
    pub id:                      DepotId,
    /// Radial ring, 0 = innermost.
    pub ring:                    u32,
    /// Position along the ring.
    pub sector:                  u32,
    pub position:                PolarPoint,
    pub inspectors:              Vec<DroneId>,
    pub servicers:               Vec<DroneId>,
    pub propellant_inventory_kg: f64,
    pub propellant_dispensed_kg: f64,
    pub services_completed:      u32,
}

impl Depot {
    pub fn new(id: DepotId, ring: u32, sector: u32, position: PolarPoint) -> Self {
        Self {
            id,
            ring,
            sector,
            position,
            inspectors: Vec::new(),
            servicers: Vec::new(),
            propellant_inventory_kg: INITIAL_INVENTORY_KG,
            propellant_dispensed_kg: 0.0,
            services_completed: 0,
        }
    }

    /// Drones stationed here of `kind`.
    pub fn roster(&self, kind: DroneKind) -> &[DroneId] {
        match kind {
            DroneKind::Inspector => &self.inspectors,
            DroneKind::Servicer => &self.servicers,
        }
    }

    pub fn drones_assigned(&self) -> usize {
        self.inspectors.len() + self.servicers.len()
    }

    /// Hand out up to `requested_kg` from inventory and return the amount
    /// actually dispensed.
    pub fn dispense(&mut self, requested_kg: f64) -> f64 {
        let amount = requested_kg.max(0.0).min(self.propellant_inventory_kg);
        self.propellant_inventory_kg -= amount;
        self.propellant_dispensed_kg += amount;
        amount
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Rings × sectors grid of depots over an annulus.
///
/// ```text
/// sectors = max(1, ⌊2π · r_mid / spacing⌋)
/// rings   = max(1, ⌊width / spacing⌋)
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DepotLayout {
    pub rings:           u32,
    pub depots_per_ring: u32,
}

impl DepotLayout {
    pub fn for_spacing(region: &Annulus, spacing_km: f64) -> Self {
        let circumference = 2.0 * PI * region.mid_radius_km();
        Self {
            rings:           (region.width_km() / spacing_km).floor().max(1.0) as u32,
            depots_per_ring: (circumference / spacing_km).floor().max(1.0) as u32,
        }
    }

    pub fn depot_count(&self) -> usize {
        self.rings as usize * self.depots_per_ring as usize
    }
}

/// Depots ring by ring, inner ring first; ids are dense in that order.
///
/// Ring `k` sits at `inner + (k + ½) / rings · width`; sector `s` at
/// `s · 360° / depots_per_ring`.
pub fn generate_depots(region: &Annulus, spacing_km: f64) -> Vec<Depot> {
    let layout = DepotLayout::for_spacing(region, spacing_km);
    let mut depots = Vec::with_capacity(layout.depot_count());

    for ring in 0..layout.rings {
        let radius_km = region.inner_km + (f64::from(ring) + 0.5) / f64::from(layout.rings) * region.width_km();
        for sector in 0..layout.depots_per_ring {
            let angle_deg = f64::from(sector) * 360.0 / f64::from(layout.depots_per_ring);
            let id = DepotId(depots.len() as u32);
            depots.push(Depot::new(id, ring, sector, PolarPoint::new(radius_km, angle_deg)));
        }
    }
    depots
}

/// Create `inspectors` then `servicers` drones and station them.
///
/// Each kind is split `⌊n / depots⌋` per depot with the remainder going one
/// each to the first depots.  Drone ids are dense: inspectors first.
pub fn station_drones(depots: &mut [Depot], inspectors: usize, servicers: usize) -> Vec<Drone> {
    let mut drones = Vec::with_capacity(inspectors + servicers);
    if depots.is_empty() {
        return drones;
    }
    for (kind, total) in [(DroneKind::Inspector, inspectors), (DroneKind::Servicer, servicers)] {
        let per_depot = total / depots.len();
        let extra = total % depots.len();
        for (d, depot) in depots.iter_mut().enumerate() {
            let n = per_depot + usize::from(d < extra);
            for _ in 0..n {
                let id = DroneId(drones.len() as u32);
                drones.push(Drone::new(id, kind, depot.id));
                match kind {
                    DroneKind::Inspector => depot.inspectors.push(id),
                    DroneKind::Servicer => depot.servicers.push(id),
                }
            }
        }
    }
    drones
}
