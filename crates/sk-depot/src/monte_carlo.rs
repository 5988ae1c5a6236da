//! Monte Carlo replication of one depot-logistics scenario.

use std::time::Instant;

use sk_core::SeededRandom;
use sk_montecarlo::{
    BatchCounts, HostScheduler, MonteCarloRunner, ProgressInfo, ReplicationBatch, never_stop, summarize,
    summarize_finite,
};
use sk_stats::{ConfidenceInterval, mean};
use tracing::info;

use crate::{DepotLogisticsConfig, DepotLogisticsRunResult, DepotResult, run_depot_simulation};

/// Aggregate over every successful replication of one scenario.
///
/// MTTR and cost only average runs that repaired something; both are `+∞`
/// if no run did.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepotSummary {
    pub mean_time_to_repair_days:     f64,
    pub mttr_std_dev:                 f64,
    pub mttr_ci95:                    ConfidenceInterval,
    pub depot_count:                  usize,
    pub total_propellant_kg_per_year: f64,
    pub propellant_std_dev:           f64,
    pub fleet_utilization_percent:    f64,
    pub utilization_std_dev:          f64,
    pub cost_per_service_mission:     f64,
    pub cost_std_dev:                 f64,
    pub avg_failures_unserviced:      f64,
    pub counts:                       BatchCounts,
}

/// Everything a caller gets back from [`run_depot_monte_carlo`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepotSimulationOutput {
    pub config:            DepotLogisticsConfig,
    pub result:            DepotSummary,
    pub runs:              usize,
    pub run_results:       Vec<DepotLogisticsRunResult>,
    pub execution_time_ms: u64,
}

/// Fold per-run results into a [`DepotSummary`].
pub fn aggregate_depot_results(results: &[DepotLogisticsRunResult], counts: BatchCounts) -> DepotSummary {
    let column = |f: fn(&DepotLogisticsRunResult) -> f64| results.iter().map(f).collect::<Vec<_>>();

    let mttr = summarize_finite(&column(|r| r.mean_time_to_repair_days));
    let propellant = summarize(&column(|r| r.total_propellant_kg_per_year));
    let utilization = summarize(&column(|r| r.fleet_utilization_percent));
    let costs: Vec<f64> = column(|r| r.cost_per_service_mission).into_iter().filter(|c| *c > 0.0).collect();
    let cost = summarize_finite(&costs);
    let any_repaired = results.iter().any(|r| r.total_repairs > 0);
    let or_inf = |x: f64| if any_repaired { x } else { f64::INFINITY };

    DepotSummary {
        mean_time_to_repair_days:     or_inf(mttr.mean()),
        mttr_std_dev:                 mttr.std_dev(),
        mttr_ci95:                    mttr.ci95,
        depot_count:                  results.first().map_or(0, |r| r.depot_count),
        total_propellant_kg_per_year: propellant.mean(),
        propellant_std_dev:           propellant.std_dev(),
        fleet_utilization_percent:    utilization.mean(),
        utilization_std_dev:          utilization.std_dev(),
        cost_per_service_mission:     or_inf(cost.mean()),
        cost_std_dev:                 cost.std_dev(),
        avg_failures_unserviced:      mean(&column(|r| r.failures_unserviced as f64)),
        counts,
    }
}

fn base_seed(config: &DepotLogisticsConfig) -> u64 {
    config.seed.unwrap_or_else(|| SeededRandom::from_entropy().seed())
}

fn replicate(config: &DepotLogisticsConfig, index: usize, seed: u64) -> DepotResult<DepotLogisticsRunResult> {
    let mut run = run_depot_simulation(config, seed)?;
    run.run_id = index;
    Ok(run)
}

fn finish(
    config: &DepotLogisticsConfig,
    runs:   usize,
    batch:  ReplicationBatch<DepotLogisticsRunResult>,
    start:  Instant,
) -> DepotResult<DepotSimulationOutput> {
    let (run_results, counts) = batch.require_success()?;
    let result = aggregate_depot_results(&run_results, counts);
    let execution_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        runs,
        failed = counts.failed,
        mttr_days = result.mean_time_to_repair_days,
        execution_time_ms,
        "depot Monte Carlo complete"
    );
    Ok(DepotSimulationOutput { config: config.clone(), result, runs, run_results, execution_time_ms })
}

/// Run `runs` replications of `config`, replication `i` seeded with
/// `config.seed + i`.
pub fn run_depot_monte_carlo(
    config:      &DepotLogisticsConfig,
    runs:        usize,
    on_progress: impl FnMut(ProgressInfo),
) -> DepotResult<DepotSimulationOutput> {
    run_depot_monte_carlo_with(&mut MonteCarloRunner::default(), config, runs, on_progress)
}

pub fn run_depot_monte_carlo_with<S: HostScheduler>(
    runner:      &mut MonteCarloRunner<S>,
    config:      &DepotLogisticsConfig,
    runs:        usize,
    on_progress: impl FnMut(ProgressInfo),
) -> DepotResult<DepotSimulationOutput> {
    config.validate()?;
    let start = Instant::now();
    let batch = runner.run_replications(
        runs,
        base_seed(config),
        |i, seed| replicate(config, i, seed),
        on_progress,
        never_stop,
    );
    finish(config, runs, batch, start)
}

/// Rayon-backed [`run_depot_monte_carlo`].
#[cfg(feature = "parallel")]
pub fn run_depot_monte_carlo_parallel(
    config:      &DepotLogisticsConfig,
    runs:        usize,
    on_progress: impl FnMut(ProgressInfo) + Send,
) -> DepotResult<DepotSimulationOutput> {
    config.validate()?;
    let start = Instant::now();
    let batch = sk_montecarlo::run_replications_parallel(
        runs,
        base_seed(config),
        |i, seed| replicate(config, i, seed),
        on_progress,
    );
    finish(config, runs, batch, start)
}
