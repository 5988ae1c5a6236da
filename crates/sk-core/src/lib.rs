//! `sk-core` — foundational types for the `simkit` simulation substrate.
//!
//! Every other `sk-*` crate builds on these types.  `sk-core` itself depends
//! only on `rand` and `thiserror` (plus `serde` behind a feature).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `DroneId`, `DepotId`, `FailureId`        |
//! | [`time`]        | `SimTime`, `SimClock`, hour/day/year constants        |
//! | [`rng`]         | `SeededRandom` (LCG), `replication_seed`              |
//! | [`transition`]  | `IllegalTransition`, `TransitionResult`               |
//! | [`validate`]    | Config field checks returning `ConfigError`           |
//! | [`error`]       | `ConfigError`, `CoreResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and the clock.       |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;
pub mod transition;
pub mod validate;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ConfigError, CoreResult};
pub use ids::{DepotId, DroneId, FailureId, VehicleId};
pub use rng::{SeededRandom, replication_seed};
pub use time::{HOURS_PER_DAY, HOURS_PER_YEAR, SimClock, SimTime};
pub use transition::{IllegalTransition, TransitionResult};
