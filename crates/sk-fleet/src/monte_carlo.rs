//! Monte Carlo replication of one fleet scenario.

use std::time::Instant;

use sk_core::SeededRandom;
use sk_montecarlo::{
    BatchCounts, MonteCarloRunner, ProgressInfo, ReplicationBatch, never_stop, summarize,
    summarize_finite,
};
use sk_stats::{ConfidenceInterval, mean};
use tracing::info;

use crate::{FleetConfig, FleetResult, FleetRunResult, run_fleet_simulation};

/// Aggregate over every successful replication of one scenario.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetSummary {
    pub throughput_kg_per_year: f64,
    pub throughput_std_dev:     f64,
    pub throughput_ci95:        ConfidenceInterval,
    /// Mean failed vehicles per replication.
    pub vehicle_failures:       f64,
    /// Mean over replications that delivered anything; `+∞` if none did.
    pub cost_per_kg_delivered:  f64,
    pub cost_per_kg_std_dev:    f64,
    pub fleet_utilization:      f64,
    pub counts:                 BatchCounts,
}

/// Everything a caller gets back from [`run_fleet_monte_carlo`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetSimulationOutput {
    pub config:            FleetConfig,
    pub result:            FleetSummary,
    /// Replications requested.
    pub runs:              usize,
    /// Successful replications, in run order.
    pub run_results:       Vec<FleetRunResult>,
    pub execution_time_ms: u64,
}

/// Fold per-run results into a [`FleetSummary`].
pub fn aggregate_results(results: &[FleetRunResult], counts: BatchCounts) -> FleetSummary {
    let column = |f: fn(&FleetRunResult) -> f64| results.iter().map(f).collect::<Vec<_>>();

    let throughput = summarize(&column(|r| r.throughput_kg_per_year));
    let cost = summarize_finite(&column(|r| r.cost_per_kg_delivered));
    let any_delivered = results.iter().any(|r| r.cost_per_kg_delivered.is_finite());

    FleetSummary {
        throughput_kg_per_year: throughput.mean(),
        throughput_std_dev:     throughput.std_dev(),
        throughput_ci95:        throughput.ci95,
        vehicle_failures:       mean(&column(|r| r.vehicle_failures as f64)),
        cost_per_kg_delivered:  if any_delivered { cost.mean() } else { f64::INFINITY },
        cost_per_kg_std_dev:    cost.std_dev(),
        fleet_utilization:      mean(&column(|r| r.fleet_utilization)),
        counts,
    }
}

fn base_seed(config: &FleetConfig) -> u64 {
    config.seed.unwrap_or_else(|| SeededRandom::from_entropy().seed())
}

fn replicate(config: &FleetConfig, index: usize, seed: u64) -> FleetResult<FleetRunResult> {
    let mut run = run_fleet_simulation(config, seed)?;
    run.run_id = index;
    Ok(run)
}

fn finish(
    config: &FleetConfig,
    runs:   usize,
    batch:  ReplicationBatch<FleetRunResult>,
    start:  Instant,
) -> FleetResult<FleetSimulationOutput> {
    let (run_results, counts) = batch.require_success()?;
    let result = aggregate_results(&run_results, counts);
    let execution_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        runs,
        failed = counts.failed,
        throughput_kg_per_year = result.throughput_kg_per_year,
        execution_time_ms,
        "fleet Monte Carlo complete"
    );
    Ok(FleetSimulationOutput { config: config.clone(), result, runs, run_results, execution_time_ms })
}

/// Run `runs` replications of `config`, replication `i` seeded with
/// `config.seed + i`.
pub fn run_fleet_monte_carlo(
    config:      &FleetConfig,
    runs:        usize,
    on_progress: impl FnMut(ProgressInfo),
) -> FleetResult<FleetSimulationOutput> {
    run_fleet_monte_carlo_with(&mut MonteCarloRunner::default(), config, runs, on_progress)
}

/// [`run_fleet_monte_carlo`] on a caller-supplied runner (custom cadence or
/// host scheduler).
pub fn run_fleet_monte_carlo_with<S: sk_montecarlo::HostScheduler>(
    runner:      &mut MonteCarloRunner<S>,
    config:      &FleetConfig,
    runs:        usize,
    on_progress: impl FnMut(ProgressInfo),
) -> FleetResult<FleetSimulationOutput> {
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

/// Rayon-backed [`run_fleet_monte_carlo`]; results are identical for the
/// same seed.
#[cfg(feature = "parallel")]
pub fn run_fleet_monte_carlo_parallel(
    config:      &FleetConfig,
    runs:        usize,
    on_progress: impl FnMut(ProgressInfo) + Send,
) -> FleetResult<FleetSimulationOutput> {
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
