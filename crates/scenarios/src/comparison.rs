use brakesim_core::ControllerKind;
use uom::si::{
    f64::{Length, Mass, Time, Velocity},
    mass::kilogram,
    velocity::kilometer_per_hour,
};

use crate::{Error, Execution, Scenario, ScenarioConfig};

/// Closed-loop and open-loop stopping results for one load condition.
///
/// Times and distances are `None` for runs that did not stop.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub load_condition: String,
    pub closed_loop_distance: Option<Length>,
    pub open_loop_distance: Option<Length>,
    pub closed_loop_time: Option<Time>,
    pub open_loop_time: Option<Time>,
}

/// Runs both controllers for every load condition at the comparison velocity.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, if parameters for either
/// controller are missing, or if any run fails.
pub fn run_comparison(
    config: &ScenarioConfig,
    execution: Execution,
) -> Result<Vec<ComparisonRow>, Error> {
    config.validate()?;
    let closed_loop = config.controller_config(ControllerKind::ClosedLoop)?;
    let open_loop = config.controller_config(ControllerKind::OpenLoop)?;
    let loop_config = config.simulation.to_config()?;

    let initial_velocity = Velocity::new::<kilometer_per_hour>(config.comparison_velocity_kmh);
    let scenarios: Vec<_> = config
        .masses_kg
        .iter()
        .zip(&config.load_conditions)
        .map(|(&mass, label)| Scenario {
            load_condition: label.clone(),
            mass: Mass::new::<kilogram>(mass),
            initial_velocity,
        })
        .collect();

    tracing::info!(
        load_conditions = scenarios.len(),
        velocity_kmh = config.comparison_velocity_kmh,
        "running closed-loop vs open-loop comparison"
    );

    execution.try_map(&scenarios, |scenario| {
        let closed = scenario.simulate(&closed_loop, &loop_config)?;
        let open = scenario.simulate(&open_loop, &loop_config)?;
        Ok(ComparisonRow {
            load_condition: scenario.load_condition.clone(),
            closed_loop_distance: closed.stopping_distance(),
            open_loop_distance: open.stopping_distance(),
            closed_loop_time: closed.stopping_time(),
            open_loop_time: open.stopping_time(),
        })
    })
}
