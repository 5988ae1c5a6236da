//! Ranking depot spacings and fleet sizes against each other.

use sk_core::ConfigError;
use sk_montecarlo::{ProgressInfo, WeightedScore, optimal_index, worst_by};

use crate::{DepotLogisticsConfig, DepotResult, DepotSummary, run_depot_monte_carlo};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepotAnalysis {
    /// Lowest mean MTTR, days.
    pub best_mttr:            f64,
    /// Lowest mean cost per service mission, $.
    pub best_cost_efficiency: f64,
    pub recommendation:       String,
}

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepotComparisonResult {
    pub configs:              Vec<DepotLogisticsConfig>,
    pub results:              Vec<DepotSummary>,
    pub optimal_config_index: usize,
    pub analysis:             DepotAnalysis,
}

/// `0.7 · 10 / (MTTR + 0.1) + 0.2 · 100 000 / (cost + 1) − 0.1 · unserviced`.
pub fn depot_score<'a>() -> WeightedScore<'a, DepotSummary> {
    WeightedScore::new()
        .term(0.7, |r: &DepotSummary| 10.0 / (r.mean_time_to_repair_days + 0.1))
        .term(0.2, |r: &DepotSummary| 100_000.0 / (r.cost_per_service_mission + 1.0))
        .term(-0.1, |r: &DepotSummary| r.avg_failures_unserviced)
}

fn spacing_k(config: &DepotLogisticsConfig) -> String {
    format!("{:.0}k km", config.depot_spacing_km / 1_000.0)
}

/// Best-MTTR and best-cost picks plus a one-line recommendation.
///
/// `None` if the slices are empty or differ in length.
pub fn analyze_depot_comparison(configs: &[DepotLogisticsConfig], results: &[DepotSummary]) -> Option<DepotAnalysis> {
    if configs.len() != results.len() {
        return None;
    }
    let best_mttr = worst_by(results, |r| r.mean_time_to_repair_days)?;
    let best_cost = worst_by(results, |r| r.cost_per_service_mission)?;
    let score = depot_score();
    let optimal = optimal_index(results, |r| score.score(r))?;

    let recommendation = if best_mttr == best_cost {
        format!(
            "Depot spacing of {} is optimal for both MTTR and cost. Achieves {:.1} day MTTR at ${:.0}k per mission.",
            spacing_k(&configs[optimal]),
            results[optimal].mean_time_to_repair_days,
            results[optimal].cost_per_service_mission / 1_000.0,
        )
    } else {
        format!(
            "Trade-off detected: {} spacing minimizes MTTR ({:.1} days), while {} spacing minimizes cost \
             (${:.0}k per mission). Recommended: {} as balanced choice.",
            spacing_k(&configs[best_mttr]),
            results[best_mttr].mean_time_to_repair_days,
            spacing_k(&configs[best_cost]),
            results[best_cost].cost_per_service_mission / 1_000.0,
            spacing_k(&configs[optimal]),
        )
    };

    Some(DepotAnalysis {
        best_mttr: results[best_mttr].mean_time_to_repair_days,
        best_cost_efficiency: results[best_cost].cost_per_service_mission,
        recommendation,
    })
}

/// Run each config for `runs_per_config` replications and rank them.
///
/// Progress is reported over the combined run count.
pub fn run_depot_comparison(
    configs:         &[DepotLogisticsConfig],
    runs_per_config: usize,
    mut on_progress: impl FnMut(ProgressInfo),
) -> DepotResult<DepotComparisonResult> {
    if configs.is_empty() {
        return Err(ConfigError::Empty { field: "configs" }.into());
    }
    let total = configs.len() * runs_per_config;
    let mut results = Vec::with_capacity(configs.len());

    for (k, config) in configs.iter().enumerate() {
        let completed = k * runs_per_config;
        let output = run_depot_monte_carlo(config, runs_per_config, |p| {
            let current = completed + p.current_iteration;
            on_progress(ProgressInfo {
                current_iteration: current,
                total_iterations:  total,
                percent_complete:  if total == 0 { 100.0 } else { current as f64 / total as f64 * 100.0 },
            });
        })?;
        results.push(output.result);
    }

    let score = depot_score();
    let optimal_config_index = optimal_index(&results, |r| score.score(r)).unwrap_or(0);
    let analysis = analyze_depot_comparison(configs, &results)
        .ok_or(ConfigError::Empty { field: "configs" })?;

    Ok(DepotComparisonResult { configs: configs.to_vec(), results, optimal_config_index, analysis })
}

/// 50k … 500k km spacings, sharing every other field with `base`.
pub fn generate_spacing_comparison_configs(base: &DepotLogisticsConfig) -> Vec<DepotLogisticsConfig> {
    const SPACINGS_KM: [f64; 7] = [50_000.0, 100_000.0, 150_000.0, 200_000.0, 300_000.0, 400_000.0, 500_000.0];
    SPACINGS_KM
        .iter()
        .map(|&depot_spacing_km| DepotLogisticsConfig { depot_spacing_km, ..base.clone() })
        .collect()
}

/// Inspector/servicer fleets from 5k/500 to 50k/5k.
pub fn generate_fleet_comparison_configs(base: &DepotLogisticsConfig) -> Vec<DepotLogisticsConfig> {
    const FLEETS: [(usize, usize); 6] = [
        (5_000, 500),
        (10_000, 1_000),
        (15_000, 1_500),
        (20_000, 2_000),
        (30_000, 3_000),
        (50_000, 5_000),
    ];
    FLEETS
        .iter()
        .map(|&(inspector_count, servicer_count)| DepotLogisticsConfig {
            inspector_count,
            servicer_count,
            ..base.clone()
        })
        .collect()
}
