//! Depot lookup and drone selection for a failure site.
//!
//! An R-tree (via `rstar`) over depot positions answers "nearest depot" and
//! "depots within range, nearest first".  Distances reported to callers are
//! the polar law-of-cosines distance, the same figure the propulsion budget
//! uses.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use sk_core::{DepotId, DroneId};
use sk_stochastic::PolarPoint;

use crate::{Depot, Drone, DroneKind};

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct DepotEntry {
    point: [f64; 2], // [x, y] km
    id:    DepotId,
}

impl RTreeObject for DepotEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for DepotEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── DepotIndex ────────────────────────────────────────────────────────────────

/// Spatial index over a fixed depot list.
pub struct DepotIndex {
    tree: RTree<DepotEntry>,
}

/// A depot picked for a failure site, with any drones it can send.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NearestDepot {
    pub depot:       DepotId,
    pub distance_km: f64,
    pub inspector:   Option<DroneId>,
    pub servicer:    Option<DroneId>,
}

/// A concrete drone assignment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Assignment {
    pub depot:       DepotId,
    pub drone:       DroneId,
    pub distance_km: f64,
}

impl DepotIndex {
    pub fn new(depots: &[Depot]) -> Self {
        let entries = depots
            .iter()
            .map(|d| DepotEntry { point: d.position.to_cartesian(), id: d.id })
            .collect();
        Self { tree: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// The closest depot to `at` and its distance.
    pub fn nearest(&self, depots: &[Depot], at: PolarPoint) -> Option<(DepotId, f64)> {
        let entry = self.tree.nearest_neighbor(&at.to_cartesian())?;
        let depot = depots.get(entry.id.index())?;
        Some((entry.id, at.distance_km(depot.position)))
    }

    /// Depots within `range_km` of `at`, nearest first.
    pub fn within(&self, depots: &[Depot], at: PolarPoint, range_km: f64) -> Vec<(DepotId, f64)> {
        // Pad the Cartesian cut-off so rounding never drops a depot exactly
        // at the range; the polar check below is authoritative.
        let cutoff_2 = (range_km * (1.0 + 1e-9)).powi(2);
        let query = at.to_cartesian();
        self.tree
            .nearest_neighbor_iter(&query)
            .take_while(|e| e.distance_2(&query) <= cutoff_2)
            .filter_map(|e| {
                let depot = depots.get(e.id.index())?;
                let d = at.distance_km(depot.position);
                (d <= range_km).then_some((e.id, d))
            })
            .collect()
    }
}

// ── Drone selection ───────────────────────────────────────────────────────────

/// First available drone of `kind` stationed at `depot`, in roster order.
pub fn available_drone(depot: &Depot, drones: &[Drone], kind: DroneKind) -> Option<DroneId> {
    depot
        .roster(kind)
        .iter()
        .copied()
        .find(|id| drones.get(id.index()).is_some_and(|d| d.kind == kind && d.is_available()))
}

/// The nearest depot to `at` with its first available inspector and
/// servicer, if any.
pub fn find_nearest_depot(
    index:  &DepotIndex,
    depots: &[Depot],
    drones: &[Drone],
    at:     PolarPoint,
) -> Option<NearestDepot> {
    let (id, distance_km) = index.nearest(depots, at)?;
    let depot = &depots[id.index()];
    Some(NearestDepot {
        depot: id,
        distance_km,
        inspector: available_drone(depot, drones, DroneKind::Inspector),
        servicer: available_drone(depot, drones, DroneKind::Servicer),
    })
}

/// Nearest depot within `max_range_km` that has an available drone of
/// `kind` able to fly the round trip at `isp_seconds`.
pub fn find_depot_with_capacity(
    index:        &DepotIndex,
    depots:       &[Depot],
    drones:       &[Drone],
    at:           PolarPoint,
    kind:         DroneKind,
    max_range_km: f64,
    isp_seconds:  f64,
) -> Option<Assignment> {
    index.within(depots, at, max_range_km).into_iter().find_map(|(depot, distance_km)| {
        let drone = available_drone(&depots[depot.index()], drones, kind)?;
        drones[drone.index()]
            .can_complete_mission(distance_km, isp_seconds)
            .then_some(Assignment { depot, drone, distance_km })
    })
}
