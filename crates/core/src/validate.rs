//! Scalar checks shared by the validated constructors.
//!
//! Each helper returns the value unchanged when it passes, so checks compose
//! with `?` inside `new` functions.

use crate::ConfigError;

/// Checks that `value` is finite.
///
/// # Errors
///
/// Returns [`ConfigError::NotFinite`] for NaN or infinite values.
pub fn finite(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotFinite { name, value })
    }
}

/// Checks that `value` is finite and strictly greater than zero.
///
/// # Errors
///
/// Returns [`ConfigError::NotFinite`] or [`ConfigError::NotPositive`].
pub fn positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if finite(name, value)? > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { name, value })
    }
}

/// Checks that `value` is finite and zero or greater.
///
/// # Errors
///
/// Returns [`ConfigError::NotFinite`] or [`ConfigError::Negative`].
pub fn non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if finite(name, value)? >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
