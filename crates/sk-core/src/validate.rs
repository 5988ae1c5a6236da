//! Small field checks shared by every domain `validate()` implementation.

use crate::{ConfigError, CoreResult};

/// `value` must be finite.
pub fn finite(field: &'static str, value: f64) -> CoreResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

/// `value` must be finite and strictly greater than zero.
pub fn positive(field: &'static str, value: f64) -> CoreResult<f64> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// `value` must be finite and `>= 0`.
pub fn non_negative(field: &'static str, value: f64) -> CoreResult<f64> {
    let value = finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// `value` must be finite and inside `[min, max]`.
pub fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> CoreResult<f64> {
    let value = finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}

/// An entity count must be at least one.
pub fn count(field: &'static str, value: usize) -> CoreResult<usize> {
    if value > 0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { field, value: 0.0 })
    }
}
