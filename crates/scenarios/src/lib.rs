//! Scenario sweeps and reports built on the brakesim simulation loop.
//!
//! - [`ScenarioConfig`] — the masses, velocities and controller settings to
//!   sweep, loadable from TOML
//! - [`run_scenarios`] — simulates every mass/velocity combination
//! - [`run_comparison`] — closed-loop vs open-loop at a single velocity
//! - [`report`] — plain-text tables of the results

mod comparison;
mod config;
mod error;
mod scenario;

pub mod report;

pub use comparison::{ComparisonRow, run_comparison};
pub use config::{ScenarioConfig, SimulationSettings};
pub use error::Error;
pub use scenario::{Execution, Scenario, ScenarioResult, run_scenarios};
