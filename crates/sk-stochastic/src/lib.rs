//! `sk-stochastic` — exogenous event generators.
//!
//! Everything here is a pure function of its parameters and a
//! [`SeededRandom`](sk_core::SeededRandom): the complete list of arrivals for
//! one replication is computed up front and then handed to the simulator,
//! which schedules it.  Draw order is fixed and documented per generator so
//! a seed always reproduces the same event list.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`poisson`]     | `PoissonProcess` — exponential inter-arrival gaps          |
//! | [`spatial`]     | `Annulus`, `PolarPoint` — uniform areal position sampling  |
//! | [`categorical`] | `Categorical<T>` — cumulative-probability roll             |
//! | [`failures`]    | `generate_failures`, `Priority`, expected-count helpers    |

pub mod categorical;
pub mod failures;
pub mod poisson;
pub mod spatial;


pub use categorical::Categorical;
pub use failures::{
    CollectorFailureEvent, FailureParams, Priority, expected_failures_per_day,
    expected_total_failures, generate_failures, sort_by_priority,
};
pub use poisson::PoissonProcess;
pub use spatial::{AU_KM, Annulus, PolarPoint};
