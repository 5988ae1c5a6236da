//! The fleet model: event table, handlers and the per-run result.

use sk_core::{HOURS_PER_YEAR, SimTime, TransitionResult, VehicleId};
use sk_des::{Model, NoopObserver, RunSummary, SimBuilder, SimContext};
use tracing::{debug, trace};

use crate::{FleetConfig, FleetResult, TransitParams, Vehicle, create_fleet, fleet_stats};

// ── Events ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FleetEvent {
    LoadingComplete(VehicleId),
    TransitComplete(VehicleId),
    UnloadingComplete(VehicleId),
    ReturnComplete(VehicleId),
    VehicleFailure(VehicleId),
}

impl FleetEvent {
    pub fn vehicle(self) -> VehicleId {
        match self {
            FleetEvent::LoadingComplete(id)
            | FleetEvent::TransitComplete(id)
            | FleetEvent::UnloadingComplete(id)
            | FleetEvent::ReturnComplete(id)
            | FleetEvent::VehicleFailure(id) => id,
        }
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Snapshot taken at the end of each mission year.
///
/// `throughput_kg`, `failures` and `trips` count what happened *during* that
/// year; `operational_vehicles` is the fleet state at year end.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetYearlyStats {
    /// 1-based mission year.
    pub year:                 u32,
    pub operational_vehicles: usize,
    pub throughput_kg:        f64,
    pub failures:             usize,
    pub trips:                u32,
}

/// Measurements from one replication.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetRunResult {
    pub run_id:                 usize,
    pub total_throughput_kg:    f64,
    pub throughput_kg_per_year: f64,
    pub vehicle_failures:       usize,
    pub total_trips:            u32,
    /// `budget / total_throughput`; `+∞` when nothing was delivered.
    pub cost_per_kg_delivered:  f64,
    /// Operational hours over `vehicles × mission hours`, in `[0, 1]`.
    pub fleet_utilization:      f64,
    pub yearly_stats:           Vec<FleetYearlyStats>,
}

// ── FleetModel ────────────────────────────────────────────────────────────────

pub struct FleetModel {
    config:  FleetConfig,
    transit: TransitParams,
    fleet:   Vec<Vehicle>,

    total_throughput_kg: f64,
    year_throughput_kg:  f64,
    failed_at_snapshot:  usize,
    trips_at_snapshot:   u32,
    yearly_stats:        Vec<FleetYearlyStats>,
}

impl FleetModel {
    pub fn new(config: FleetConfig) -> Self {
        Self::with_transit(config, TransitParams::default())
    }

    pub fn with_transit(config: FleetConfig, transit: TransitParams) -> Self {
        let fleet = create_fleet(config.vehicle_count, config.payload_capacity_kg);
        Self {
            config,
            transit,
            fleet,
            total_throughput_kg: 0.0,
            year_throughput_kg:  0.0,
            failed_at_snapshot:  0,
            trips_at_snapshot:   0,
            yearly_stats:        Vec::new(),
        }
    }

    pub fn fleet(&self) -> &[Vehicle] {
        &self.fleet
    }

    pub fn total_throughput_kg(&self) -> f64 {
        self.total_throughput_kg
    }

    // ── Handlers ──────────────────────────────────────────────────────────
    //
    // Each takes the vehicle by value and returns its next state; `handle`
    // writes it back.

    fn on_loading_complete(&self, v: Vehicle, ctx: &mut SimContext<'_, FleetEvent>) -> Vehicle {
        let v = keep_on_reject(v, v.start_loading());
        let v = keep_on_reject(v, v.complete_loading(v.payload_capacity_kg));
        let v = keep_on_reject(v, v.start_transit());
        ctx.schedule_after(FleetEvent::TransitComplete(v.id), self.transit.transit_time(v.current_payload_kg));
        v
    }

    fn on_transit_complete(&self, v: Vehicle, ctx: &mut SimContext<'_, FleetEvent>) -> Vehicle {
        let hours = self.transit.transit_time(v.current_payload_kg);
        let v = keep_on_reject(v, v.complete_transit(hours));
        let v = keep_on_reject(v, v.start_unloading());
        ctx.schedule_after(FleetEvent::UnloadingComplete(v.id), self.transit.unloading_time(v.current_payload_kg));
        v
    }

    fn on_unloading_complete(&mut self, v: Vehicle, ctx: &mut SimContext<'_, FleetEvent>) -> Vehicle {
        let before = v.total_delivered_kg;
        let v = keep_on_reject(v, v.complete_unloading());
        let v = keep_on_reject(v, v.start_return());

        let delivered = v.total_delivered_kg - before;
        self.total_throughput_kg += delivered;
        self.year_throughput_kg += delivered;

        ctx.schedule_after(FleetEvent::ReturnComplete(v.id), self.transit.return_time());
        v
    }

    fn on_return_complete(&self, v: Vehicle, ctx: &mut SimContext<'_, FleetEvent>) -> Vehicle {
        let v = keep_on_reject(v, v.complete_return(self.transit.return_time()));

        // Only start another cycle if its loading finishes inside the mission.
        let loading = self.transit.loading_time(self.config.payload_capacity_kg);
        if ctx.now() + loading < ctx.horizon() {
            ctx.schedule_after(FleetEvent::LoadingComplete(v.id), loading);
        }
        v
    }
}

/// The no-op transition policy: a rejected transition leaves the vehicle
/// unchanged.
fn keep_on_reject(vehicle: Vehicle, next: TransitionResult<Vehicle>) -> Vehicle {
    next.unwrap_or_else(|rejected| {
        trace!(%rejected, "transition rejected");
        vehicle
    })
}

impl Model for FleetModel {
    type Event = FleetEvent;
    type Output = FleetRunResult;

    fn init(&mut self, ctx: &mut SimContext<'_, FleetEvent>) {
        for v in &self.fleet {
            ctx.schedule_at(FleetEvent::LoadingComplete(v.id), 0.0);
        }

        if self.config.annual_failure_rate > 0.0 {
            let per_hour = self.config.annual_failure_rate / HOURS_PER_YEAR;
            for v in &self.fleet {
                let at: SimTime = ctx.rng().next_exponential(per_hour);
                if at < ctx.horizon() {
                    ctx.schedule_at(FleetEvent::VehicleFailure(v.id), at);
                }
            }
        }
    }

    fn handle(&mut self, event: FleetEvent, ctx: &mut SimContext<'_, FleetEvent>) {
        let id = event.vehicle();
        let Some(&vehicle) = self.fleet.get(id.index()) else {
            trace!(%id, "event for unknown vehicle dropped");
            return;
        };
        if !vehicle.is_operational() {
            return;
        }

        let next = match event {
            FleetEvent::LoadingComplete(_) => self.on_loading_complete(vehicle, ctx),
            FleetEvent::TransitComplete(_) => self.on_transit_complete(vehicle, ctx),
            FleetEvent::UnloadingComplete(_) => self.on_unloading_complete(vehicle, ctx),
            FleetEvent::ReturnComplete(_) => self.on_return_complete(vehicle, ctx),
            FleetEvent::VehicleFailure(_) => keep_on_reject(vehicle, vehicle.fail(ctx.now())),
        };
        self.fleet[id.index()] = next;
    }

    fn on_period_end(&mut self, period: u64, _ctx: &mut SimContext<'_, FleetEvent>) {
        let stats = fleet_stats(&self.fleet);
        self.yearly_stats.push(FleetYearlyStats {
            year:                 period as u32 + 1,
            operational_vehicles: stats.operational_vehicles,
            throughput_kg:        self.year_throughput_kg,
            failures:             stats.failed_vehicles - self.failed_at_snapshot,
            trips:                stats.total_trips - self.trips_at_snapshot,
        });
        self.year_throughput_kg = 0.0;
        self.failed_at_snapshot = stats.failed_vehicles;
        self.trips_at_snapshot = stats.total_trips;
    }

    fn finish(self, summary: &RunSummary) -> FleetRunResult {
        let stats = fleet_stats(&self.fleet);
        let operational_hours: f64 = self.fleet.iter().map(|v| v.hours_operational).sum();
        let max_hours = self.config.vehicle_count as f64 * summary.horizon;

        FleetRunResult {
            run_id: 0,
            total_throughput_kg: self.total_throughput_kg,
            throughput_kg_per_year: self.total_throughput_kg / self.config.mission_duration_years,
            vehicle_failures: stats.failed_vehicles,
            total_trips: stats.total_trips,
            cost_per_kg_delivered: if self.total_throughput_kg > 0.0 {
                self.config.budget_dollars / self.total_throughput_kg
            } else {
                f64::INFINITY
            },
            fleet_utilization: if max_hours > 0.0 { operational_hours / max_hours } else { 0.0 },
            yearly_stats: self.yearly_stats,
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Run one replication of `config` seeded with `seed`.
pub fn run_fleet_simulation(config: &FleetConfig, seed: u64) -> FleetResult<FleetRunResult> {
    config.validate()?;
    debug!(seed, vehicles = config.vehicle_count, "fleet replication");

    let sim = SimBuilder::new(config.mission_hours())
        .period(HOURS_PER_YEAR)
        .seed(seed)
        .queue_capacity(config.vehicle_count * 2)
        .build(FleetModel::new(config.clone()))?;
    Ok(sim.run(&mut NoopObserver)?)
}
