//! `sk-des` — event-driven simulation loop shared by every simkit model.
//!
//! # Event loop
//!
//! ```text
//! build:  model.init(ctx)                    — seed entities, enqueue exogenous events
//! loop while queue non-empty:
//!   ① Horizon  — next.time > horizon ⇒ discard the rest, stop
//!   ② Periods  — emit on_period_end for every boundary ≤ next.time
//!   ③ Clock    — clock.advance_to(next.time)
//!   ④ Dispatch — model.handle(event, ctx)    — mutate entities, schedule follow-ups
//! finish: emit remaining period ends up to the horizon, model.finish(summary)
//! ```
//!
//! A model only ever sees a [`SimContext`]: the current time, the queue (for
//! scheduling) and the replication's RNG.  It never sees the wall clock, and
//! the loop never yields mid-replication.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sk_des::{NoopObserver, SimBuilder};
//!
//! let sim = SimBuilder::new(8_760.0)
//!     .period(8_760.0)
//!     .seed(12345)
//!     .build(FleetModel::new(config))?;
//! let result = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod model;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use context::SimContext;
pub use error::{SimError, SimResult};
pub use model::Model;
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunSummary, Simulator};
