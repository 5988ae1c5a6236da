//! Configuration error type.
//!
//! Domain crates validate their configuration records once, before any
//! replication starts, and fail fast with a [`ConfigError`] instead of
//! letting degenerate values (zero fleets, negative rates) turn into `NaN`
//! aggregates.  Sub-crates wrap it as one variant of their own error enum.

use thiserror::Error;

/// A configuration field holds a value the simulation cannot run with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },

    #[error("{field} must lie in [{min}, {max}] (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min:   f64,
        max:   f64,
    },

    #[error("{field} must contain at least one entry")]
    Empty { field: &'static str },

    #[error("configuration error: {0}")]
    Invalid(String),
}

/// Shorthand result type for configuration validation.
pub type CoreResult<T> = Result<T, ConfigError>;
