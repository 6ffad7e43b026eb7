use brakesim_core::ConfigError;

/// Errors that can occur when setting up a braking run.
///
/// All errors are raised before the first integration step, so a failed call
/// never leaves a partially integrated run behind.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}
