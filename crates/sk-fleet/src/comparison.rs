//! Ranking several fleet shapes against each other.

use sk_core::ConfigError;
use sk_montecarlo::{ProgressInfo, WeightedScore, best_by, optimal_index, worst_by};

use crate::{FleetConfig, FleetResult, FleetSummary, run_fleet_monte_carlo};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetAnalysis {
    /// Highest mean throughput, kg/year.
    pub best_throughput:      f64,
    /// Lowest mean cost, $/kg.
    pub best_cost_efficiency: f64,
    pub recommendation:       String,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetComparisonResult {
    pub configs:              Vec<FleetConfig>,
    pub results:              Vec<FleetSummary>,
    pub optimal_config_index: usize,
    pub analysis:             FleetAnalysis,
}

/// `0.7 · throughput [Mt/yr] + 0.3 · 1 / cost [k$/kg]`.
pub fn fleet_score<'a>() -> WeightedScore<'a, FleetSummary> {
    WeightedScore::new()
        .term(0.7, |r: &FleetSummary| r.throughput_kg_per_year / 1_000_000.0)
        .term(0.3, |r: &FleetSummary| 1.0 / (r.cost_per_kg_delivered / 1_000.0))
}

fn shape(config: &FleetConfig) -> String {
    format!("{}×{:.0}t", config.vehicle_count, config.payload_capacity_kg / 1_000.0)
}

/// Best-throughput and best-cost picks plus a one-line recommendation.
///
/// `None` if the slices are empty or differ in length.
pub fn analyze_comparison(configs: &[FleetConfig], results: &[FleetSummary]) -> Option<FleetAnalysis> {
    if configs.len() != results.len() {
        return None;
    }
    let best_tp = best_by(results, |r| r.throughput_kg_per_year)?;
    let best_cost = worst_by(results, |r| r.cost_per_kg_delivered)?;
    let score = fleet_score();
    let optimal = &configs[optimal_index(results, |r| score.score(r))?];

    let recommendation = if best_tp == best_cost {
        format!(
            "Configuration with {} vehicles × {:.0}t capacity is optimal for both throughput and cost.",
            optimal.vehicle_count,
            optimal.payload_capacity_kg / 1_000.0,
        )
    } else {
        format!(
            "Trade-off detected: {} maximizes throughput, while {} minimizes cost per kg.",
            shape(&configs[best_tp]),
            shape(&configs[best_cost]),
        )
    };

    Some(FleetAnalysis {
        best_throughput: results[best_tp].throughput_kg_per_year,
        best_cost_efficiency: results[best_cost].cost_per_kg_delivered,
        recommendation,
    })
}

/// Run each config for `runs_per_config` replications and rank them.
///
/// Progress is reported over the combined run count.
pub fn run_fleet_comparison(
    configs:         &[FleetConfig],
    runs_per_config: usize,
    mut on_progress: impl FnMut(ProgressInfo),
) -> FleetResult<FleetComparisonResult> {
    if configs.is_empty() {
        return Err(ConfigError::Empty { field: "configs" }.into());
    }
    let total = configs.len() * runs_per_config;
    let mut results = Vec::with_capacity(configs.len());

    for (k, config) in configs.iter().enumerate() {
        let completed = k * runs_per_config;
        let output = run_fleet_monte_carlo(config, runs_per_config, |p| {
            let current = completed + p.current_iteration;
            on_progress(ProgressInfo {
                current_iteration: current,
                total_iterations:  total,
                percent_complete:  if total == 0 { 100.0 } else { current as f64 / total as f64 * 100.0 },
            });
        })?;
        results.push(output.result);
    }

    let score = fleet_score();
    let optimal_config_index = optimal_index(&results, |r| score.score(r)).unwrap_or(0);
    let analysis = analyze_comparison(configs, &results)
        .ok_or(ConfigError::Empty { field: "configs" })?;

    Ok(FleetComparisonResult { configs: configs.to_vec(), results, optimal_config_index, analysis })
}

/// The standard sweep from a few large vehicles to many small ones
/// (5×300t … 25×80t), sharing every other field with `base`.
pub fn generate_comparison_configs(base: &FleetConfig) -> Vec<FleetConfig> {
    const SHAPES: [(usize, f64); 6] = [
        (5, 300_000.0),
        (8, 250_000.0),
        (10, 200_000.0),
        (15, 150_000.0),
        (20, 100_000.0),
        (25, 80_000.0),
    ];
    SHAPES
        .iter()
        .map(|&(vehicle_count, payload_capacity_kg)| FleetConfig {
            vehicle_count,
            payload_capacity_kg,
            ..base.clone()
        })
        .collect()
}
