//! Error type for rejected entity state transitions.
//!
//! Entity state machines (vehicles, drones) expose each transition as a pure
//! method `fn(self, …) -> TransitionResult<Self>`.  A transition attempted
//! from the wrong source state returns [`IllegalTransition`] instead of a new
//! value.  Event handlers that want "ignore and keep going" semantics write
//!
//! ```rust,ignore
//! let vehicle = vehicle.start_loading().unwrap_or(vehicle);
//! ```
//!
//! which keeps the historical no-op behaviour while still letting tests (or a
//! stricter model) assert on the rejection.

use thiserror::Error;

/// A transition was attempted from a state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity}: cannot {action} while {from}")]
pub struct IllegalTransition {
    /// Display form of the entity id, e.g. `vehicle-3`.
    pub entity: String,
    /// Status the entity was in.
    pub from:   &'static str,
    /// Name of the rejected transition.
    pub action: &'static str,
}

impl IllegalTransition {
    pub fn new(entity: impl ToString, from: &'static str, action: &'static str) -> Self {
        Self { entity: entity.to_string(), from, action }
    }
}

/// Result of an entity transition.
pub type TransitionResult<T> = Result<T, IllegalTransition>;
