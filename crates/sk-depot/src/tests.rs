//! Tests for the depot logistics model.

use sk_core::{DepotId, DroneId, FailureId};
use sk_stochastic::{Annulus, PolarPoint};

use crate::propulsion::{delta_v, leg_propellant, propellant_required, transit_hours};
use crate::*;

// ── Helpers ───────────────────────────────────────────────────────────────────

const SPARSE_SPACING_KM: f64 = 2_000_000.0;

/// One inspector and one servicer per depot on a coarse grid, with an Isp
/// high enough that every drone can reach its neighbourhood.
fn sparse_config(days: f64, swarm_size_millions: f64) -> DepotLogisticsConfig {
    let depots = DepotLayout::for_spacing(&Annulus::swarm_band(), SPARSE_SPACING_KM).depot_count();
    DepotLogisticsConfig {
        depot_spacing_km:         SPARSE_SPACING_KM,
        inspector_count:          depots,
        servicer_count:           depots,
        swarm_size_millions,
        failure_rate_per_year:    0.02,
        inspector_range_km:       3_000_000.0,
        servicer_range_km:        2_000_000.0,
        propellant_budget_kg:     20.0,
        isp_seconds:              20_000.0,
        simulation_duration_days: days,
        seed:                     Some(7),
    }
}

/// 2 rings × 18 sectors over a 1 000–2 000 km annulus.
fn small_grid() -> Vec<Depot> {
    generate_depots(&Annulus::new(1_000.0, 2_000.0), 500.0)
}

fn summary(mttr_days: f64, cost: f64, unserviced: f64) -> DepotSummary {
    DepotSummary {
        mean_time_to_repair_days:     mttr_days,
        mttr_std_dev:                 0.0,
        mttr_ci95:                    sk_stats::confidence_interval(&[mttr_days], 0.95),
        depot_count:                  100,
        total_propellant_kg_per_year: 0.0,
        propellant_std_dev:           0.0,
        fleet_utilization_percent:    1.0,
        utilization_std_dev:          0.0,
        cost_per_service_mission:     cost,
        cost_std_dev:                 0.0,
        avg_failures_unserviced:      unserviced,
        counts:                       sk_montecarlo::BatchCounts { requested: 1, succeeded: 1, failed: 0 },
    }
}

fn spacing(km: f64) -> DepotLogisticsConfig {
    DepotLogisticsConfig { depot_spacing_km: km, ..DepotLogisticsConfig::default() }
}

// ── Propulsion ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod propulsion_budget {
    use super::*;

    #[test]
    fn delta_v_is_linear_in_distance() {
        assert_eq!(delta_v(100_000.0), 1_000.0);
        assert_eq!(delta_v(250_000.0), 2_500.0);
        assert_eq!(delta_v(0.0), 0.0);
    }

    #[test]
    fn tsiolkovsky() {
        assert_eq!(propellant_required(0.0, 35.0, 2_000.0), 0.0);
        // Δv equal to the exhaust velocity needs (e − 1) × dry mass.
        let ve = 2_000.0 * propulsion::G0;
        let p = propellant_required(ve, 100.0, 2_000.0);
        assert!((p - 100.0 * (std::f64::consts::E - 1.0)).abs() < 1e-9);
    }

    #[test]
    fn transit_hours_by_kind() {
        assert_eq!(transit_hours(10_000.0, DroneKind::Inspector), 12.0);
        assert_eq!(transit_hours(10_000.0, DroneKind::Servicer), 18.0);
        assert_eq!(transit_hours(250_000.0, DroneKind::Inspector), 300.0);
    }

    #[test]
    fn mission_margin() {
        let inspector = Drone::new(DroneId(0), DroneKind::Inspector, DepotId(0));
        // 600 000 km round trip needs ~12.5 kg; ×1.1 still fits 15 kg.
        assert!(inspector.can_complete_mission(300_000.0, 2_000.0));
        // 700 000 km needs ~15.0 kg before the margin.
        assert!(!inspector.can_complete_mission(350_000.0, 2_000.0));
    }

    #[test]
    fn consumption_never_goes_negative() {
        let d = Drone::new(DroneId(0), DroneKind::Inspector, DepotId(0)).consume_propellant(10_000_000.0, 2_000.0);
        assert_eq!(d.propellant_kg, 0.0);
        assert_eq!(d.distance_traveled_km, 10_000_000.0);
    }

    #[test]
    fn consumption_matches_leg_propellant() {
        let d = Drone::new(DroneId(0), DroneKind::Servicer, DepotId(0)).consume_propellant(100_000.0, 1_800.0);
        let used = leg_propellant(100_000.0, 200.0, 1_800.0);
        assert!((d.propellant_kg - (50.0 - used)).abs() < 1e-12);
    }
}

// ── Drone state machine ───────────────────────────────────────────────────────

#[cfg(test)]
mod drone_cycle {
    use super::*;

    fn inspector() -> Drone {
        Drone::new(DroneId(0), DroneKind::Inspector, DepotId(4))
    }

    #[test]
    fn inspector_sortie() {
        let d = inspector()
            .dispatch(FailureId(9))
            .and_then(Drone::arrive)
            .unwrap();
        assert_eq!(d.status, DroneStatus::Inspecting);
        assert_eq!(d.target, Some(FailureId(9)));

        let d = d
            .finish_inspection()
            .and_then(Drone::dock)
            .and_then(|d| d.refuel(0.0))
            .unwrap();
        assert_eq!(d.status, DroneStatus::Idle);
        assert_eq!(d.target, None);
        assert_eq!(d.missions_completed, 0);
    }

    #[test]
    fn servicer_repair_counts_mission() {
        let d = Drone::new(DroneId(1), DroneKind::Servicer, DepotId(0))
            .dispatch(FailureId(0))
            .and_then(Drone::arrive)
            .unwrap();
        assert_eq!(d.status, DroneStatus::Repairing);
        let d = d.complete_repair().unwrap();
        assert_eq!(d.status, DroneStatus::Returning);
        assert_eq!(d.missions_completed, 1);
        // Inspection is not a servicer step.
        assert!(d.finish_inspection().is_err());
    }

    #[test]
    fn wrong_state_is_rejected() {
        let d = inspector();
        let err = d.arrive().unwrap_err();
        assert_eq!(err.to_string(), "drone-0: cannot arrive while idle");
        let busy = d.dispatch(FailureId(0)).unwrap();
        assert!(busy.dispatch(FailureId(1)).is_err());
    }

    #[test]
    fn refuel_clamps_to_tank() {
        let d = inspector().consume_propellant(300_000.0, 2_000.0);
        let d = Drone { status: DroneStatus::Refueling, ..d }.refuel(1_000.0).unwrap();
        assert_eq!(d.propellant_kg, d.max_propellant_kg);
    }

    #[test]
    fn availability_threshold() {
        let mut d = inspector();
        assert!(d.is_available());
        d.propellant_kg = 3.0; // exactly 20 %
        assert!(!d.is_available());
        d.propellant_kg = 3.1;
        assert!(d.is_available());
        d.status = DroneStatus::Returning;
        assert!(!d.is_available());
    }

    #[test]
    fn stats_by_kind() {
        let mut depots = small_grid();
        let mut drones = station_drones(&mut depots, 5, 2);
        drones[0].missions_completed = 2;
        drones[6].status = DroneStatus::InTransit;

        let s = drone_stats(&drones);
        assert_eq!(s.total_drones, 7);
        assert_eq!(s.inspectors, 5);
        assert_eq!(s.servicers, 2);
        assert_eq!(s.available, 6);
        assert_eq!(s.missions_completed, 2);
        assert_eq!(s.propellant_on_board, 5.0 * 15.0 + 2.0 * 50.0);
    }
}

// ── Depot layout ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod layout {
    use super::*;

    #[test]
    fn swarm_band_default_spacing() {
        let layout = DepotLayout::for_spacing(&Annulus::swarm_band(), 200_000.0);
        assert_eq!(layout.rings, 74);
        assert_eq!(layout.depots_per_ring, 4_699);
        assert_eq!(layout.depot_count(), 347_726);
    }

    #[test]
    fn spacing_wider_than_band_keeps_one_ring() {
        let layout = DepotLayout::for_spacing(&Annulus::new(1_000.0, 2_000.0), 5_000.0);
        assert_eq!(layout.rings, 1);
        assert_eq!(layout.depots_per_ring, 1);
    }

    #[test]
    fn ring_radii_and_sector_angles() {
        let depots = small_grid();
        assert_eq!(depots.len(), 36);
        assert_eq!(depots[0].position, PolarPoint::new(1_250.0, 0.0));
        assert_eq!(depots[1].position.angle_deg, 20.0);
        assert_eq!(depots[18].ring, 1);
        assert_eq!(depots[18].position.radius_km, 1_750.0);
        assert!(depots.iter().enumerate().all(|(i, d)| d.id.index() == i));
        assert!(depots.iter().all(|d| d.propellant_inventory_kg == INITIAL_INVENTORY_KG));
    }

    #[test]
    fn drones_split_with_remainder_first() {
        let mut depots: Vec<Depot> = small_grid().into_iter().take(5).collect();
        let drones = station_drones(&mut depots, 7, 2);

        let inspectors: Vec<usize> = depots.iter().map(|d| d.inspectors.len()).collect();
        let servicers: Vec<usize> = depots.iter().map(|d| d.servicers.len()).collect();
        assert_eq!(inspectors, vec![2, 2, 1, 1, 1]);
        assert_eq!(servicers, vec![1, 1, 0, 0, 0]);

        assert_eq!(depots[0].inspectors, vec![DroneId(0), DroneId(1)]);
        assert_eq!(depots[0].servicers, vec![DroneId(7)]);
        assert_eq!(drones[7].kind, DroneKind::Servicer);
        assert_eq!(drones[8].home, DepotId(1));
    }

    #[test]
    fn dispense_is_limited_by_inventory() {
        let mut depot = small_grid().swap_remove(0);
        assert_eq!(depot.dispense(30.0), 30.0);
        depot.propellant_inventory_kg = 10.0;
        assert_eq!(depot.dispense(30.0), 10.0);
        assert_eq!(depot.propellant_inventory_kg, 0.0);
        assert_eq!(depot.propellant_dispensed_kg, 40.0);
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch_search {
    use super::*;

    fn stocked() -> (Vec<Depot>, Vec<Drone>, DepotIndex) {
        let mut depots = small_grid();
        let drones = station_drones(&mut depots, 36, 36);
        let index = DepotIndex::new(&depots);
        (depots, drones, index)
    }

    #[test]
    fn nearest_depot_and_its_drones() {
        let (depots, drones, index) = stocked();
        assert_eq!(index.len(), 36);

        let n = find_nearest_depot(&index, &depots, &drones, PolarPoint::new(1_260.0, 1.0)).unwrap();
        assert_eq!(n.depot, DepotId(0));
        assert_eq!(n.inspector, Some(DroneId(0)));
        assert_eq!(n.servicer, Some(DroneId(36)));
        assert!(n.distance_km < 30.0);
    }

    #[test]
    fn within_range_is_nearest_first() {
        let (depots, _, index) = stocked();
        let hits = index.within(&depots, PolarPoint::new(1_250.0, 0.0), 450.0);
        // Depot 0 plus its two ring neighbours at ±20°.
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0], (DepotId(0), 0.0));
        assert!(hits[1].1 <= hits[2].1);
        assert!((hits[1].1 - 2.0 * 1_250.0 * 10f64.to_radians().sin()).abs() < 1e-6);
    }

    #[test]
    fn capacity_search_skips_busy_depots() {
        let (depots, mut drones, index) = stocked();
        drones[0].status = DroneStatus::InTransit;

        let at = PolarPoint::new(1_250.0, 0.0);
        let a = find_depot_with_capacity(&index, &depots, &drones, at, DroneKind::Inspector, 450.0, 2_000.0).unwrap();
        assert!(a.depot == DepotId(1) || a.depot == DepotId(17));
        assert_eq!(a.drone, depots[a.depot.index()].inspectors[0]);

        // Servicers at depot 0 are still free.
        let s = find_depot_with_capacity(&index, &depots, &drones, at, DroneKind::Servicer, 450.0, 2_000.0).unwrap();
        assert_eq!(s.depot, DepotId(0));
    }

    #[test]
    fn capacity_search_respects_range() {
        let (depots, mut drones, index) = stocked();
        for d in drones.iter_mut().filter(|d| d.home == DepotId(0)) {
            d.status = DroneStatus::Repairing;
        }
        let at = PolarPoint::new(1_250.0, 0.0);
        assert!(find_depot_with_capacity(&index, &depots, &drones, at, DroneKind::Inspector, 100.0, 2_000.0).is_none());
    }
}

// ── Single replication ────────────────────────────────────────────────────────

#[cfg(test)]
mod replication {
    use super::*;

    #[test]
    fn no_failures_means_nothing_to_repair() {
        let config = DepotLogisticsConfig { failure_rate_per_year: 0.0, ..sparse_config(365.0, 0.001) };
        let r = run_depot_simulation(&config, 1).unwrap();
        assert_eq!(r.total_failures, 0);
        assert_eq!(r.total_repairs, 0);
        assert_eq!(r.failures_unserviced, 0);
        assert_eq!(r.mean_time_to_repair_days, f64::INFINITY);
        assert_eq!(r.cost_per_service_mission, f64::INFINITY);
        assert_eq!(r.total_propellant_kg_per_year, 0.0);
        assert_eq!(r.fleet_utilization_percent, 0.0);
        assert_eq!(r.depot_count, DepotLayout::for_spacing(&Annulus::swarm_band(), SPARSE_SPACING_KM).depot_count());
    }

    #[test]
    fn failures_are_repaired_and_accounted() {
        let config = sparse_config(3_650.0, 0.001);
        let r = run_depot_simulation(&config, 11).unwrap();

        assert!(r.total_failures > 100);
        assert!(r.total_repairs > 0);
        assert_eq!(r.total_repairs as usize + r.failures_unserviced, r.total_failures);

        // Inspection (≥ 1 h) plus repair (≥ 4 h) at the very least.
        assert!(r.mean_time_to_repair_days.is_finite());
        assert!(r.mean_time_to_repair_days >= 5.0 / 24.0);
        assert!(r.cost_per_service_mission >= model::MISSION_OVERHEAD);
        assert!(r.fleet_utilization_percent > 0.0);

        // Every depot holds one drone of each kind, so every depot reports.
        assert_eq!(r.depot_stats.len(), r.depot_count);
        assert!(r.depot_stats.iter().all(|d| d.drones_assigned == 2));
        let services: u32 = r.depot_stats.iter().map(|d| d.services_completed).sum();
        assert_eq!(services, r.total_repairs);
    }

    #[test]
    fn same_seed_same_result() {
        let config = sparse_config(365.0, 0.001);
        let a = run_depot_simulation(&config, 99).unwrap();
        let b = run_depot_simulation(&config, 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn drones_without_depots_in_range_leave_failures_pending() {
        let config = DepotLogisticsConfig {
            inspector_count: 0,
            servicer_count: 0,
            ..sparse_config(365.0, 0.001)
        };
        let r = run_depot_simulation(&config, 3).unwrap();
        assert_eq!(r.total_repairs, 0);
        assert_eq!(r.failures_unserviced, r.total_failures);
        assert!(r.depot_stats.is_empty());
    }

    #[test]
    fn quick_run_uses_config_seed() {
        let config = sparse_config(365.0, 0.001);
        let quick = run_quick_depot_simulation(&config).unwrap();
        assert_eq!(quick, run_depot_simulation(&config, 7).unwrap());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DepotLogisticsConfig { depot_spacing_km: 0.0, ..DepotLogisticsConfig::default() };
        assert!(matches!(run_depot_simulation(&config, 1), Err(DepotError::Config(_))));
    }

    #[test]
    fn model_stations_every_drone() {
        let config = sparse_config(365.0, 0.001);
        let model = DepotModel::new(config.clone());
        assert_eq!(model.drones().len(), config.inspector_count + config.servicer_count);
        assert!(model.depots().iter().all(|d| d.drones_assigned() == 2));
        assert!(model.failures().is_empty());
        assert!(model.pending().is_empty());
    }
}

// ── Monte Carlo and comparison ────────────────────────────────────────────────

#[cfg(test)]
mod ranking {
    use super::*;

    #[test]
    fn monte_carlo_collects_every_run() {
        let config = sparse_config(365.0, 0.001);
        let mut seen = Vec::new();
        let out = run_depot_monte_carlo(&config, 3, |p| seen.push(p.current_iteration)).unwrap();

        assert_eq!(out.runs, 3);
        assert_eq!(out.result.counts.succeeded, 3);
        let ids: Vec<usize> = out.run_results.iter().map(|r| r.run_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(out.result.depot_count, out.run_results[0].depot_count);
        assert!(!seen.is_empty());
    }

    #[test]
    fn monte_carlo_is_reproducible() {
        let config = sparse_config(365.0, 0.001);
        let a = run_depot_monte_carlo(&config, 2, |_| {}).unwrap();
        let b = run_depot_monte_carlo(&config, 2, |_| {}).unwrap();
        assert_eq!(a.run_results, b.run_results);
        assert_eq!(a.result, b.result);
    }

    #[test]
    fn aggregate_ignores_runs_without_repairs() {
        let config = DepotLogisticsConfig { failure_rate_per_year: 0.0, ..sparse_config(365.0, 0.001) };
        let r = run_depot_simulation(&config, 1).unwrap();
        let counts = sk_montecarlo::BatchCounts { requested: 1, succeeded: 1, failed: 0 };
        let s = aggregate_depot_results(&[r], counts);
        assert_eq!(s.mean_time_to_repair_days, f64::INFINITY);
        assert_eq!(s.cost_per_service_mission, f64::INFINITY);
        assert_eq!(s.avg_failures_unserviced, 0.0);
    }

    #[test]
    fn trade_off_recommendation() {
        let configs = [spacing(100_000.0), spacing(200_000.0)];
        let results = [summary(1.0, 20_000.0, 0.0), summary(2.0, 15_000.0, 0.0)];
        let a = analyze_depot_comparison(&configs, &results).unwrap();

        assert_eq!(a.best_mttr, 1.0);
        assert_eq!(a.best_cost_efficiency, 15_000.0);
        assert_eq!(
            a.recommendation,
            "Trade-off detected: 100k km spacing minimizes MTTR (1.0 days), while 200k km spacing \
             minimizes cost ($15k per mission). Recommended: 100k km as balanced choice."
        );
    }

    #[test]
    fn single_winner_recommendation() {
        let configs = [spacing(100_000.0), spacing(200_000.0)];
        let results = [summary(1.0, 15_000.0, 0.0), summary(2.0, 20_000.0, 0.0)];
        let a = analyze_depot_comparison(&configs, &results).unwrap();
        assert_eq!(
            a.recommendation,
            "Depot spacing of 100k km is optimal for both MTTR and cost. Achieves 1.0 day MTTR at $15k per mission."
        );
    }

    #[test]
    fn unserviced_failures_cost_score() {
        let score = depot_score();
        let clean = score.score(&summary(1.0, 15_000.0, 0.0));
        let backlog = score.score(&summary(1.0, 15_000.0, 50.0));
        assert!((clean - backlog - 5.0).abs() < 1e-9);
    }

    #[test]
    fn mismatched_inputs_give_no_analysis() {
        assert!(analyze_depot_comparison(&[spacing(1.0)], &[]).is_none());
        assert!(analyze_depot_comparison(&[], &[]).is_none());
    }

    #[test]
    fn empty_comparison_is_a_config_error() {
        assert!(matches!(run_depot_comparison(&[], 3, |_| {}), Err(DepotError::Config(_))));
    }

    #[test]
    fn comparison_reports_overall_progress() {
        let base = sparse_config(180.0, 0.001);
        let configs = [base.clone(), DepotLogisticsConfig { isp_seconds: 30_000.0, ..base }];
        let mut last = None;
        let result = run_depot_comparison(&configs, 2, |p| last = Some(p)).unwrap();

        assert_eq!(result.results.len(), 2);
        assert!(result.optimal_config_index < 2);
        let last = last.unwrap();
        assert_eq!(last.total_iterations, 4);
        assert_eq!(last.current_iteration, 4);
    }

    #[test]
    fn sweep_generators() {
        let base = DepotLogisticsConfig::default().with_seed(5);

        let spacings: Vec<f64> = generate_spacing_comparison_configs(&base).iter().map(|c| c.depot_spacing_km).collect();
        assert_eq!(spacings, vec![50_000.0, 100_000.0, 150_000.0, 200_000.0, 300_000.0, 400_000.0, 500_000.0]);

        let fleets = generate_fleet_comparison_configs(&base);
        assert_eq!(fleets.len(), 6);
        assert_eq!((fleets[0].inspector_count, fleets[0].servicer_count), (5_000, 500));
        assert_eq!((fleets[5].inspector_count, fleets[5].servicer_count), (50_000, 5_000));
        assert!(fleets.iter().all(|c| c.seed == Some(5) && c.depot_spacing_km == 200_000.0));
    }

    #[test]
    fn default_config() {
        let c = DepotLogisticsConfig::default();
        assert_eq!(c.depot_spacing_km, 200_000.0);
        assert_eq!((c.inspector_count, c.servicer_count), (10_000, 1_000));
        assert_eq!(c.duration_hours(), 8_760.0);
        assert!(c.validate().is_ok());
    }
}
