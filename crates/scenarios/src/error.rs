use std::{io, path::PathBuf};

use brakesim_core::ConfigError;
use brakesim_simulation::braking;
use thiserror::Error;

/// Errors that can occur while loading or running scenarios.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read scenario file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse scenario file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid scenario configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{masses} masses but {labels} load-condition labels")]
    MismatchedLabels { masses: usize, labels: usize },

    #[error("simulation failed: {0}")]
    Simulation(#[from] braking::Error),
}
