//! The depot-logistics model: failure records, the sortie event table and
//! the per-run result.
//!
//! Each failure goes through two sorties:
//!
//! ```text
//! FailureDetected ─▶ InspectorArrival ─▶ ServicerDispatch ─▶ ServicerArrival ─▶ RepairComplete
//!   (inspector out)   (1–4 h inspect)    (inspector home,    (2 + 2·priority     (servicer home)
//!                                         servicer out)       + U(0,2) h)
//! ```
//!
//! When no drone can be sent the failure joins a pending list that is
//! retried after every repair and every refuel.

use sk_core::{DepotId, DroneId, FailureId, SeededRandom, SimTime, TransitionResult};
use sk_des::{Model, NoopObserver, RunSummary, SimBuilder, SimContext};
use sk_stochastic::{CollectorFailureEvent, generate_failures};
use tracing::{debug, trace};

use crate::dispatch::{Assignment, DepotIndex, find_depot_with_capacity, find_nearest_depot};
use crate::propulsion::{REFUEL_THRESHOLD, transit_hours};
use crate::{Depot, DepotLogisticsConfig, DepotResult, Drone, DroneKind, generate_depots, station_drones};

/// Rough active hours credited per completed repair in the utilisation figure.
pub const HOURS_PER_MISSION: f64 = 20.0;

/// Propellant price, $/kg.
pub const PROPELLANT_COST_PER_KG: f64 = 50.0;

/// Fixed operations cost per service mission, $.
pub const MISSION_OVERHEAD: f64 = 10_000.0;

// ── Failure record ────────────────────────────────────────────────────────────

/// A detected failure and the progress of its service.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectorFailure {
    pub event:             CollectorFailureEvent,
    /// Depot the inspector was sent from.
    pub assigned_depot:    Option<DepotId>,
    pub inspector:         Option<DroneId>,
    pub servicer:          Option<DroneId>,
    pub inspector_arrival: Option<SimTime>,
    pub servicer_arrival:  Option<SimTime>,
    pub repaired_at:       Option<SimTime>,
}

impl CollectorFailure {
    pub fn new(event: CollectorFailureEvent) -> Self {
        Self {
            event,
            assigned_depot: None,
            inspector: None,
            servicer: None,
            inspector_arrival: None,
            servicer_arrival: None,
            repaired_at: None,
        }
    }

    #[inline]
    pub fn id(&self) -> FailureId {
        self.event.id
    }

    #[inline]
    pub fn is_repaired(&self) -> bool {
        self.repaired_at.is_some()
    }

    /// Detection to repair, hours.
    pub fn response_time(&self) -> Option<SimTime> {
        self.repaired_at.map(|t| t - self.event.detected_at)
    }
}

// ── Events ────────────────────────────────────────────────────────────────────

/// One drone's leg to or from a failure site.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sortie {
    pub failure:     FailureId,
    pub drone:       DroneId,
    pub depot:       DepotId,
    pub distance_km: f64,
}

impl Sortie {
    fn new(failure: FailureId, a: Assignment) -> Self {
        Self { failure, drone: a.drone, depot: a.depot, distance_km: a.distance_km }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DepotEvent {
    FailureDetected(FailureId),
    InspectorArrival(Sortie),
    /// Inspection finished: the inspector heads home and a servicer is sought.
    ServicerDispatch(Sortie),
    ServicerArrival(Sortie),
    RepairComplete(Sortie),
    DroneRefuel { drone: DroneId, depot: DepotId },
}

// ── Results ───────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepotStats {
    pub depot_id:                DepotId,
    pub services_completed:      u32,
    /// Over repaired failures whose inspector came from this depot; 0 if none.
    pub avg_response_time_hours: f64,
    pub drones_assigned:         usize,
    pub propellant_consumed_kg:  f64,
}

/// Measurements from one replication.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepotLogisticsRunResult {
    pub run_id:                       usize,
    /// Mean detection-to-repair time; `+∞` when nothing was repaired.
    pub mean_time_to_repair_days:     f64,
    pub depot_count:                  usize,
    pub total_propellant_kg_per_year: f64,
    pub fleet_utilization_percent:    f64,
    /// `(propellant · $50 + repairs · $10k) / repairs`; `+∞` with no repairs.
    pub cost_per_service_mission:     f64,
    /// Depots with drones stationed or any recorded activity.
    pub depot_stats:                  Vec<DepotStats>,
    pub failures_unserviced:          usize,
    pub total_failures:               usize,
    pub total_repairs:                u32,
}

// ── DepotModel ────────────────────────────────────────────────────────────────

pub struct DepotModel {
    config:   DepotLogisticsConfig,
    index:    DepotIndex,
    depots:   Vec<Depot>,
    drones:   Vec<Drone>,
    failures: Vec<CollectorFailure>,
    pending:  Vec<FailureId>,

    total_response_hours: f64,
    repairs:              u32,
}

impl DepotModel {
    /// Lay out depots and station drones.  Failures are drawn in `init`
    /// from the replication's random stream.
    pub fn new(config: DepotLogisticsConfig) -> Self {
        let mut depots = generate_depots(&config.region(), config.depot_spacing_km);
        let drones = station_drones(&mut depots, config.inspector_count, config.servicer_count);
        let index = DepotIndex::new(&depots);
        Self {
            config,
            index,
            depots,
            drones,
            failures: Vec::new(),
            pending: Vec::new(),
            total_response_hours: 0.0,
            repairs: 0,
        }
    }

    pub fn depots(&self) -> &[Depot] {
        &self.depots
    }

    pub fn drones(&self) -> &[Drone] {
        &self.drones
    }

    pub fn failures(&self) -> &[CollectorFailure] {
        &self.failures
    }

    pub fn pending(&self) -> &[FailureId] {
        &self.pending
    }

    fn isp(&self) -> f64 {
        self.config.isp_seconds
    }

    /// Apply `f` to a drone, keeping it unchanged if the transition is
    /// rejected.  `false` if the id is unknown.
    fn update_drone(&mut self, id: DroneId, f: impl FnOnce(Drone) -> TransitionResult<Drone>) -> bool {
        let Some(slot) = self.drones.get_mut(id.index()) else {
            trace!(%id, "unknown drone");
            return false;
        };
        let current = *slot;
        *slot = f(current).unwrap_or_else(|rejected| {
            trace!(%rejected, "transition rejected");
            current
        });
        true
    }

    fn burn(&mut self, id: DroneId, distance_km: f64) {
        let isp = self.isp();
        if let Some(d) = self.drones.get_mut(id.index()) {
            *d = d.consume_propellant(distance_km, isp);
        }
    }

    fn find_capacity(&self, failure: FailureId, kind: DroneKind) -> Option<Assignment> {
        let at = self.failures.get(failure.index())?.event.position;
        let range = match kind {
            DroneKind::Inspector => self.config.inspector_range_km,
            DroneKind::Servicer => self.config.servicer_range_km,
        };
        find_depot_with_capacity(&self.index, &self.depots, &self.drones, at, kind, range, self.isp())
    }

    // ── Dispatch ──────────────────────────────────────────────────────────

    fn dispatch_inspector(&mut self, failure: FailureId, a: Assignment, ctx: &mut SimContext<'_, DepotEvent>) {
        if let Some(f) = self.failures.get_mut(failure.index()) {
            f.assigned_depot = Some(a.depot);
            f.inspector = Some(a.drone);
        }
        self.update_drone(a.drone, |d| d.dispatch(failure));
        ctx.schedule_after(
            DepotEvent::InspectorArrival(Sortie::new(failure, a)),
            transit_hours(a.distance_km, DroneKind::Inspector),
        );
    }

    fn dispatch_servicer(&mut self, failure: FailureId, a: Assignment, ctx: &mut SimContext<'_, DepotEvent>) {
        if let Some(f) = self.failures.get_mut(failure.index()) {
            f.servicer = Some(a.drone);
        }
        self.update_drone(a.drone, |d| d.dispatch(failure));
        ctx.schedule_after(
            DepotEvent::ServicerArrival(Sortie::new(failure, a)),
            transit_hours(a.distance_km, DroneKind::Servicer),
        );
    }

    /// Send a drone home and book its refuel on arrival.
    fn send_home(&mut self, s: Sortie, kind: DroneKind, ctx: &mut SimContext<'_, DepotEvent>) {
        self.burn(s.drone, s.distance_km);
        ctx.schedule_after(
            DepotEvent::DroneRefuel { drone: s.drone, depot: s.depot },
            transit_hours(s.distance_km, kind),
        );
    }

    // ── Handlers ──────────────────────────────────────────────────────────

    fn on_failure_detected(&mut self, id: FailureId, ctx: &mut SimContext<'_, DepotEvent>) {
        let Some(at) = self.failures.get(id.index()).map(|f| f.event.position) else {
            return;
        };

        let nearest = find_nearest_depot(&self.index, &self.depots, &self.drones, at);
        match nearest.and_then(|n| n.inspector.map(|drone| (n, drone))) {
            Some((n, drone)) => {
                let feasible = n.distance_km <= self.config.inspector_range_km
                    && self.drones[drone.index()].can_complete_mission(n.distance_km, self.isp());
                if feasible {
                    let a = Assignment { depot: n.depot, drone, distance_km: n.distance_km };
                    self.dispatch_inspector(id, a, ctx);
                } else {
                    self.pending.push(id);
                }
            }
            None => match self.find_capacity(id, DroneKind::Inspector) {
                Some(a) => self.dispatch_inspector(id, a, ctx),
                None => self.pending.push(id),
            },
        }
    }

    fn on_inspector_arrival(&mut self, s: Sortie, ctx: &mut SimContext<'_, DepotEvent>) {
        let Some(f) = self.failures.get_mut(s.failure.index()) else {
            return;
        };
        f.inspector_arrival = Some(ctx.now());
        if !self.update_drone(s.drone, Drone::arrive) {
            return;
        }
        self.burn(s.drone, s.distance_km);

        let inspection = 1.0 + ctx.rng().next_f64() * 3.0;
        ctx.schedule_after(DepotEvent::ServicerDispatch(s), inspection);
    }

    fn on_servicer_dispatch(&mut self, s: Sortie, ctx: &mut SimContext<'_, DepotEvent>) {
        if s.failure.index() >= self.failures.len() || !self.update_drone(s.drone, Drone::finish_inspection) {
            return;
        }
        self.send_home(s, DroneKind::Inspector, ctx);

        match self.find_capacity(s.failure, DroneKind::Servicer) {
            Some(a) => self.dispatch_servicer(s.failure, a, ctx),
            None => self.pending.push(s.failure),
        }
    }

    fn on_servicer_arrival(&mut self, s: Sortie, ctx: &mut SimContext<'_, DepotEvent>) {
        let Some(f) = self.failures.get_mut(s.failure.index()) else {
            return;
        };
        f.servicer_arrival = Some(ctx.now());
        let priority = f64::from(f.event.priority.rank());
        if !self.update_drone(s.drone, Drone::arrive) {
            return;
        }
        self.burn(s.drone, s.distance_km);

        let repair = 2.0 + 2.0 * priority + ctx.rng().next_f64() * 2.0;
        ctx.schedule_after(DepotEvent::RepairComplete(s), repair);
    }

    fn on_repair_complete(&mut self, s: Sortie, ctx: &mut SimContext<'_, DepotEvent>) {
        if s.depot.index() >= self.depots.len() {
            return;
        }
        let Some(f) = self.failures.get_mut(s.failure.index()) else {
            return;
        };
        let now = ctx.now();
        f.repaired_at = Some(now);
        let response = now - f.event.detected_at;
        if !self.update_drone(s.drone, Drone::complete_repair) {
            return;
        }

        self.depots[s.depot.index()].services_completed += 1;
        self.total_response_hours += response;
        self.repairs += 1;

        self.send_home(s, DroneKind::Servicer, ctx);
        self.process_pending(ctx);
    }

    fn on_drone_refuel(&mut self, drone: DroneId, depot: DepotId, ctx: &mut SimContext<'_, DepotEvent>) {
        if depot.index() >= self.depots.len() || !self.update_drone(drone, Drone::dock) {
            return;
        }
        let d = self.drones[drone.index()];
        let top_up = if d.propellant_ratio() < REFUEL_THRESHOLD {
            self.depots[depot.index()].dispense(d.propellant_deficit_kg())
        } else {
            0.0
        };
        self.update_drone(drone, |d| d.refuel(top_up));
        self.process_pending(ctx);
    }

    /// Retry every pending failure once, in the order they were queued.
    fn process_pending(&mut self, ctx: &mut SimContext<'_, DepotEvent>) {
        let queued = std::mem::take(&mut self.pending);
        let mut remaining = Vec::with_capacity(queued.len());

        for id in queued {
            let Some(f) = self.failures.get(id.index()).copied() else {
                continue;
            };
            if f.is_repaired() {
                continue;
            }
            if f.inspector.is_none() {
                if let Some(a) = self.find_capacity(id, DroneKind::Inspector) {
                    self.dispatch_inspector(id, a, ctx);
                    continue;
                }
            } else if f.servicer.is_none() {
                if let Some(a) = self.find_capacity(id, DroneKind::Servicer) {
                    self.dispatch_servicer(id, a, ctx);
                    continue;
                }
            }
            remaining.push(id);
        }
        self.pending = remaining;
    }
}

impl Model for DepotModel {
    type Event = DepotEvent;
    type Output = DepotLogisticsRunResult;

    fn init(&mut self, ctx: &mut SimContext<'_, DepotEvent>) {
        let generated = generate_failures(&self.config.failure_params(), ctx.rng());
        debug!(
            failures = generated.len(),
            depots = self.depots.len(),
            drones = self.drones.len(),
            "depot model initialised"
        );

        self.failures = generated.into_iter().map(CollectorFailure::new).collect();
        for f in &self.failures {
            ctx.schedule_at(DepotEvent::FailureDetected(f.id()), f.event.detected_at);
        }
    }

    fn handle(&mut self, event: DepotEvent, ctx: &mut SimContext<'_, DepotEvent>) {
        match event {
            DepotEvent::FailureDetected(id) => self.on_failure_detected(id, ctx),
            DepotEvent::InspectorArrival(s) => self.on_inspector_arrival(s, ctx),
            DepotEvent::ServicerDispatch(s) => self.on_servicer_dispatch(s, ctx),
            DepotEvent::ServicerArrival(s) => self.on_servicer_arrival(s, ctx),
            DepotEvent::RepairComplete(s) => self.on_repair_complete(s, ctx),
            DepotEvent::DroneRefuel { drone, depot } => self.on_drone_refuel(drone, depot, ctx),
        }
    }

    fn finish(self, summary: &RunSummary) -> DepotLogisticsRunResult {
        // Per-depot response time, keyed by the inspector's depot.
        let mut response = vec![(0.0_f64, 0_u32); self.depots.len()];
        for f in &self.failures {
            if let (Some(depot), Some(t)) = (f.assigned_depot, f.response_time()) {
                if let Some(slot) = response.get_mut(depot.index()) {
                    slot.0 += t;
                    slot.1 += 1;
                }
            }
        }

        let depot_stats = self
            .depots
            .iter()
            .zip(&response)
            .filter(|(d, r)| {
                d.drones_assigned() > 0 || d.services_completed > 0 || d.propellant_dispensed_kg > 0.0 || r.1 > 0
            })
            .map(|(d, &(sum, n))| DepotStats {
                depot_id:                d.id,
                services_completed:      d.services_completed,
                avg_response_time_hours: if n > 0 { sum / f64::from(n) } else { 0.0 },
                drones_assigned:         d.drones_assigned(),
                propellant_consumed_kg:  d.propellant_dispensed_kg,
            })
            .collect();

        let propellant: f64 = self.depots.iter().map(|d| d.propellant_dispensed_kg).sum();
        let missions: u32 = self.drones.iter().map(|d| d.missions_completed).sum();
        let possible_hours = self.drones.len() as f64 * summary.horizon;
        let years = self.config.simulation_duration_days / 365.0;
        let repairs = f64::from(self.repairs);

        DepotLogisticsRunResult {
            run_id: 0,
            mean_time_to_repair_days: if self.repairs > 0 {
                self.total_response_hours / repairs / 24.0
            } else {
                f64::INFINITY
            },
            depot_count: self.depots.len(),
            total_propellant_kg_per_year: if years > 0.0 { propellant / years } else { 0.0 },
            fleet_utilization_percent: if possible_hours > 0.0 {
                f64::from(missions) * HOURS_PER_MISSION / possible_hours * 100.0
            } else {
                0.0
            },
            cost_per_service_mission: if self.repairs > 0 {
                (propellant * PROPELLANT_COST_PER_KG + repairs * MISSION_OVERHEAD) / repairs
            } else {
                f64::INFINITY
            },
            depot_stats,
            failures_unserviced: self.failures.iter().filter(|f| !f.is_repaired()).count(),
            total_failures: self.failures.len(),
            total_repairs: self.repairs,
        }
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Run one replication of `config` seeded with `seed`.
pub fn run_depot_simulation(config: &DepotLogisticsConfig, seed: u64) -> DepotResult<DepotLogisticsRunResult> {
    config.validate()?;
    debug!(seed, spacing_km = config.depot_spacing_km, "depot replication");

    let sim = SimBuilder::new(config.duration_hours())
        .seed(seed)
        .build(DepotModel::new(config.clone()))?;
    Ok(sim.run(&mut NoopObserver)?)
}

/// One replication seeded from `config.seed`, or from the clock if unset.
pub fn run_quick_depot_simulation(config: &DepotLogisticsConfig) -> DepotResult<DepotLogisticsRunResult> {
    let seed = config.seed.unwrap_or_else(|| SeededRandom::from_entropy().seed());
    run_depot_simulation(config, seed)
}
