//! fleet-demo — end-to-end run of the simkit logistics models.
//!
//! 1. Sweeps six fleet shapes (5×300t … 25×80t) and ranks them.
//! 2. Re-runs the winning shape and keeps its per-run results.
//! 3. Runs a depot-logistics scenario on a reduced swarm.
//! 4. Writes `runs.csv` and `summary.json` into the output directory.
//!
//! Usage: `fleet-demo [settings.json]`.  Every field of the settings file is
//! optional; see [`DemoSettings`].  Log verbosity follows `RUST_LOG`
//! (default `info`).

mod report;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sk_depot::{DepotLogisticsConfig, run_depot_monte_carlo};
use sk_fleet::{FleetConfig, generate_comparison_configs, run_fleet_comparison, run_fleet_monte_carlo};

use report::{Summary, depot_rows, fleet_rows, write_runs_csv, write_summary_json};

// ── Settings ──────────────────────────────────────────────────────────────────

const SEED: u64 = 42;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct DemoSettings {
    output_dir:            PathBuf,
    fleet:                 FleetConfig,
    fleet_runs_per_config: usize,
    depot:                 DepotLogisticsConfig,
    depot_runs:            usize,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            output_dir:            PathBuf::from("output/fleet-demo"),
            fleet:                 FleetConfig::default().with_seed(SEED),
            fleet_runs_per_config: 20,
            // 50 000 collectors, about 1 000 failures a year.
            depot:                 DepotLogisticsConfig {
                swarm_size_millions: 0.05,
                ..DepotLogisticsConfig::default().with_seed(SEED)
            },
            depot_runs:            5,
        }
    }
}

fn load_settings() -> Result<DemoSettings> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(DemoSettings::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings()?;
    println!("=== fleet-demo — simkit logistics models ===");
    println!(
        "Fleet runs/config: {}  |  Depot runs: {}  |  Output: {}",
        settings.fleet_runs_per_config,
        settings.depot_runs,
        settings.output_dir.display()
    );
    println!();

    let t0 = Instant::now();

    // 1. Fleet comparison.
    let configs = generate_comparison_configs(&settings.fleet);
    let comparison = run_fleet_comparison(&configs, settings.fleet_runs_per_config, |p| {
        if p.current_iteration == p.total_iterations {
            info!(runs = p.total_iterations, "fleet comparison finished");
        }
    })?;

    println!("{:<12} {:>16} {:>14} {:>12}", "Fleet", "Throughput t/yr", "Cost $/kg", "Utilization");
    println!("{}", "-".repeat(57));
    for (config, result) in comparison.configs.iter().zip(&comparison.results) {
        println!(
            "{:<12} {:>16.0} {:>14.0} {:>11.1}%",
            format!("{}×{:.0}t", config.vehicle_count, config.payload_capacity_kg / 1_000.0),
            result.throughput_kg_per_year / 1_000.0,
            result.cost_per_kg_delivered,
            result.fleet_utilization * 100.0,
        );
    }
    println!();
    println!("{}", comparison.analysis.recommendation);
    println!();

    // 2. Winning shape in detail.
    let optimal = &comparison.configs[comparison.optimal_config_index];
    let fleet_out = run_fleet_monte_carlo(optimal, settings.fleet_runs_per_config, |_| {})?;

    // 3. Depot logistics.
    let depot_out = run_depot_monte_carlo(&settings.depot, settings.depot_runs, |p| {
        info!(run = p.current_iteration, of = p.total_iterations, "depot replication");
    })?;
    let depot = &depot_out.result;
    println!(
        "Depots: {}  |  MTTR: {:.2} days (95% CI {:.2}–{:.2})  |  Cost: ${:.0}/mission  |  Unserviced: {:.1}",
        depot.depot_count,
        depot.mean_time_to_repair_days,
        depot.mttr_ci95.lower,
        depot.mttr_ci95.upper,
        depot.cost_per_service_mission,
        depot.avg_failures_unserviced,
    );
    println!();

    // 4. Output.
    std::fs::create_dir_all(&settings.output_dir)
        .with_context(|| format!("creating {}", settings.output_dir.display()))?;

    let mut rows = fleet_rows(comparison.optimal_config_index, &fleet_out.run_results);
    rows.extend(depot_rows(0, &depot_out.run_results));
    let runs_path = write_runs_csv(&settings.output_dir, &rows)?;

    let summary = Summary {
        fleet_comparison: &comparison,
        fleet_optimal:    &fleet_out.result,
        depot_config:     &settings.depot,
        depot,
    };
    let summary_path = write_summary_json(&settings.output_dir, &summary)?;

    println!("Done in {:.3} s", t0.elapsed().as_secs_f64());
    println!("  {} : {} rows", runs_path.display(), rows.len());
    println!("  {}", summary_path.display());

    Ok(())
}
