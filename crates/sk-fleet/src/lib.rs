//! `sk-fleet` — fleet logistics on the simkit event loop.
//!
//! A fleet of identical cargo vehicles cycles between a mining source and an
//! orbital processing facility:
//!
//! ```text
//! Idle ─▶ Loading ─▶ InTransit ─▶ Unloading ─▶ Returning ─▶ Idle
//!   └──────────────────── fail(t) from any state ─────────────────▶ Failed
//! ```
//!
//! Each replication runs for the mission duration with one period per year,
//! recording a [`FleetYearlyStats`] row at every year end.  The Monte Carlo
//! layer repeats the scenario, aggregates throughput and cost per kilogram,
//! and can rank several fleet shapes against each other.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`vehicle`]     | `Vehicle`, `VehicleStatus`, transitions, `fleet_stats`   |
//! | [`transit`]     | `TransitParams` and the cycle-time formulas              |
//! | [`config`]      | `FleetConfig` (with defaults and `validate`)             |
//! | [`model`]       | `FleetModel`, `FleetEvent`, `FleetRunResult`             |
//! | [`monte_carlo`] | `run_fleet_monte_carlo`, `FleetSummary`                  |
//! | [`comparison`]  | `run_fleet_comparison`, `analyze_comparison`             |
//! | [`error`]       | `FleetError`, `FleetResult<T>`                           |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Adds `run_fleet_monte_carlo_parallel` (Rayon).             |
//! | `serde`    | Serialize/Deserialize on configs and results.              |

pub mod comparison;
pub mod config;
pub mod error;
pub mod model;
pub mod monte_carlo;
pub mod transit;
pub mod vehicle;


pub use comparison::{
    FleetAnalysis, FleetComparisonResult, analyze_comparison, fleet_score,
    generate_comparison_configs, run_fleet_comparison,
};
pub use config::FleetConfig;
pub use error::{FleetError, FleetResult};
pub use model::{FleetEvent, FleetModel, FleetRunResult, FleetYearlyStats, run_fleet_simulation};
#[cfg(feature = "parallel")]
pub use monte_carlo::run_fleet_monte_carlo_parallel;
pub use monte_carlo::{
    FleetSimulationOutput, FleetSummary, aggregate_results, run_fleet_monte_carlo,
    run_fleet_monte_carlo_with,
};
pub use transit::TransitParams;
pub use vehicle::{FleetStats, Vehicle, VehicleStatus, create_fleet, fleet_stats, idle_vehicle};
