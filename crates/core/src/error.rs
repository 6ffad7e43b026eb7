use thiserror::Error;

use crate::ControllerKind;

/// Errors raised when a simulation is configured with invalid values.
///
/// Every constructor that accepts user-supplied parameters validates them
/// eagerly, so these errors surface before any integration step runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("unknown controller kind `{0}`, expected `closed-loop` or `open-loop`")]
    UnknownControllerKind(String),

    #[error("{kind} controller requires parameter `{parameter}`")]
    MissingParameter {
        kind: ControllerKind,
        parameter: &'static str,
    },

    #[error("{name} must be greater than zero, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
}
