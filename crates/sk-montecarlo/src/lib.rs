//! `sk-montecarlo` — run many independent replications and summarise them.
//!
//! # Replication loop
//!
//! ```text
//! for i in 0..total:
//!   ① Stop      — should_stop(completed) ⇒ break (in-flight work always finishes)
//!   ② Progress  — i == 0, i % progress_every == 0, or i == total-1 ⇒ report, yield
//!   ③ Run       — iteration_fn(i), seeded with base_seed + i
//!   ④ Yield     — if yield_interval has elapsed since the last yield
//! final progress report (100 % unless stopped early)
//! ```
//!
//! Seeds are append-only: raising `total` never changes what replications
//! `0..old_total` produce.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`config`]      | `RunnerConfig` (yield interval, progress cadence)        |
//! | [`scheduler`]   | `HostScheduler` trait, `ThreadYield`                     |
//! | [`progress`]    | `ProgressInfo`, `BatchedProgressInfo`                    |
//! | [`runner`]      | `MonteCarloRunner::run`, `run_batched`                   |
//! | [`replication`] | Panic/`Err` isolation, `ReplicationBatch`                |
//! | [`aggregate`]   | `MetricSummary`, `BatchCounts`, `summarize`              |
//! | [`compare`]     | `WeightedScore`, `optimal_index`, `best_by`, `worst_by`  |
//! | [`error`]       | `MonteCarloError`, `MonteCarloResult<T>`                 |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                        |
//! |------------|---------------------------------------------------------------|
//! | `parallel` | Adds `run_replications_parallel` on Rayon's thread pool.      |
//! | `serde`    | Serialize/Deserialize on progress and summary types.          |

pub mod aggregate;
pub mod compare;
pub mod config;
pub mod error;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod progress;
pub mod replication;
pub mod runner;
pub mod scheduler;


pub use aggregate::{BatchCounts, MetricSummary, summarize, summarize_finite};
pub use compare::{WeightedScore, best_by, optimal_index, worst_by};
pub use config::RunnerConfig;
pub use error::{MonteCarloError, MonteCarloResult};
#[cfg(feature = "parallel")]
pub use parallel::run_replications_parallel;
pub use progress::{BatchedProgressInfo, ProgressInfo};
pub use replication::{ReplicationBatch, ReplicationFailure};
pub use runner::{MonteCarloRunner, never_stop, no_progress};
pub use scheduler::{HostScheduler, ThreadYield};
pub use sk_core::replication_seed;
