//! `runs.csv` and `summary.json` writers.
//!
//! `runs.csv` is in long format, one row per (model, run, metric), so fleet
//! and depot replications share a header:
//!
//! ```text
//! model,config_index,run_id,metric,value
//! fleet,0,0,throughput_kg_per_year,1000000.0
//! depot,0,0,mean_time_to_repair_days,3.2
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sk_depot::{DepotLogisticsConfig, DepotLogisticsRunResult, DepotSummary};
use sk_fleet::{FleetComparisonResult, FleetRunResult, FleetSummary};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;

// ── runs.csv ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, PartialEq)]
pub struct RunRow {
    pub model:        &'static str,
    pub config_index: usize,
    pub run_id:       usize,
    pub metric:       &'static str,
    pub value:        f64,
}

pub fn fleet_rows(config_index: usize, runs: &[FleetRunResult]) -> Vec<RunRow> {
    let mut rows = Vec::with_capacity(runs.len() * 5);
    for r in runs {
        let mut push = |metric, value| {
            rows.push(RunRow { model: "fleet", config_index, run_id: r.run_id, metric, value });
        };
        push("throughput_kg_per_year", r.throughput_kg_per_year);
        push("vehicle_failures", r.vehicle_failures as f64);
        push("total_trips", f64::from(r.total_trips));
        push("cost_per_kg_delivered", r.cost_per_kg_delivered);
        push("fleet_utilization", r.fleet_utilization);
    }
    rows
}

pub fn depot_rows(config_index: usize, runs: &[DepotLogisticsRunResult]) -> Vec<RunRow> {
    let mut rows = Vec::with_capacity(runs.len() * 6);
    for r in runs {
        let mut push = |metric, value| {
            rows.push(RunRow { model: "depot", config_index, run_id: r.run_id, metric, value });
        };
        push("mean_time_to_repair_days", r.mean_time_to_repair_days);
        push("total_propellant_kg_per_year", r.total_propellant_kg_per_year);
        push("fleet_utilization_percent", r.fleet_utilization_percent);
        push("cost_per_service_mission", r.cost_per_service_mission);
        push("failures_unserviced", r.failures_unserviced as f64);
        push("total_repairs", f64::from(r.total_repairs));
    }
    rows
}

/// Write `rows` to `dir/runs.csv` and return the path.
pub fn write_runs_csv(dir: &Path, rows: &[RunRow]) -> ReportResult<PathBuf> {
    let path = dir.join("runs.csv");
    let mut writer = csv::Writer::from_path(&path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(path)
}

// ── summary.json ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub fleet_comparison: &'a FleetComparisonResult,
    /// Re-run of the winning fleet shape.
    pub fleet_optimal:    &'a FleetSummary,
    pub depot_config:     &'a DepotLogisticsConfig,
    pub depot:            &'a DepotSummary,
}

/// Write `summary` to `dir/summary.json` and return the path.
///
/// Non-finite metrics (`+∞` cost with nothing delivered) become `null`.
pub fn write_summary_json(dir: &Path, summary: &Summary<'_>) -> ReportResult<PathBuf> {
    let path = dir.join("summary.json");
    let file = BufWriter::new(File::create(&path)?);
    serde_json::to_writer_pretty(file, summary)?;
    Ok(path)
}
