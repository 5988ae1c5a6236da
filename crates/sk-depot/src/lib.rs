//! `sk-depot` — depot maintenance logistics on the simkit event loop.
//!
//! Depots are laid out on a rings × sectors grid across the swarm band and
//! stock inspector and servicer drones.  Every collector failure is first
//! inspected, then repaired:
//!
//! ```text
//! failure ─▶ nearest depot with an inspector ─▶ inspect 1–4 h
//!         ─▶ nearest depot with a servicer in range ─▶ repair ─▶ drones home, refuel
//! ```
//!
//! Drones burn propellant per leg (Tsiolkovsky with a linear Δv model) and
//! are only sent if the round trip fits their tank with a 10 % margin.  A
//! failure no drone can reach waits on a pending list that is retried after
//! each repair and refuel.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`config`]      | `DepotLogisticsConfig` (with defaults and `validate`)     |
//! | [`propulsion`]  | Δv, propellant, transit-time formulas and thresholds      |
//! | [`drone`]       | `Drone`, `DroneKind`, `DroneStatus`, `drone_stats`        |
//! | [`depot`]       | `Depot`, `DepotLayout`, layout and drone stationing       |
//! | [`dispatch`]    | `DepotIndex` (R-tree), nearest / in-range depot search    |
//! | [`model`]       | `DepotModel`, `DepotEvent`, `DepotLogisticsRunResult`     |
//! | [`monte_carlo`] | `run_depot_monte_carlo`, `DepotSummary`                   |
//! | [`comparison`]  | `run_depot_comparison`, config sweeps                     |
//! | [`error`]       | `DepotError`, `DepotResult<T>`                            |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Adds `run_depot_monte_carlo_parallel` (Rayon).             |
//! | `serde`    | Serialize/Deserialize on configs and results.              |

pub mod comparison;
pub mod config;
pub mod depot;
pub mod dispatch;
pub mod drone;
pub mod error;
pub mod model;
pub mod monte_carlo;
pub mod propulsion;

#[cfg(test)]
mod tests;

pub use comparison::{
    DepotAnalysis, DepotComparisonResult, analyze_depot_comparison, depot_score,
    generate_fleet_comparison_configs, generate_spacing_comparison_configs, run_depot_comparison,
};
pub use config::DepotLogisticsConfig;
pub use depot::{Depot, DepotLayout, INITIAL_INVENTORY_KG, generate_depots, station_drones};
pub use dispatch::{Assignment, DepotIndex, NearestDepot, find_depot_with_capacity, find_nearest_depot};
pub use drone::{Drone, DroneKind, DroneStats, DroneStatus, drone_stats};
pub use error::{DepotError, DepotResult};
pub use model::{
    CollectorFailure, DepotEvent, DepotLogisticsRunResult, DepotModel, DepotStats, Sortie,
    run_depot_simulation, run_quick_depot_simulation,
};
#[cfg(feature = "parallel")]
pub use monte_carlo::run_depot_monte_carlo_parallel;
pub use monte_carlo::{
    DepotSimulationOutput, DepotSummary, aggregate_depot_results, run_depot_monte_carlo,
    run_depot_monte_carlo_with,
};
