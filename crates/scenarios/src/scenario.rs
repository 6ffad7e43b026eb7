use brakesim_core::{ControllerConfig, ControllerKind};
use brakesim_simulation::braking::{self, Solution};
use rayon::prelude::*;
use uom::si::{
    f64::{Mass, Velocity},
    mass::kilogram,
    velocity::kilometer_per_hour,
};

use crate::{Error, ScenarioConfig};

/// How a batch of independent runs is executed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Execution {
    /// Runs on the global rayon thread pool.
    #[default]
    Parallel,
    Sequential,
}

impl Execution {
    /// Maps `f` over `items`, preserving order in both modes.
    pub(crate) fn try_map<T, R, F>(self, items: &[T], f: F) -> Result<Vec<R>, Error>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> Result<R, Error> + Sync + Send,
    {
        match self {
            Self::Parallel => items.par_iter().map(f).collect(),
            Self::Sequential => items.iter().map(f).collect(),
        }
    }
}

/// One combination of load condition and initial velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub load_condition: String,
    pub mass: Mass,
    pub initial_velocity: Velocity,
}

impl Scenario {
    /// Enumerates every scenario of `config`, masses outermost.
    #[must_use]
    pub fn all(config: &ScenarioConfig) -> Vec<Self> {
        config
            .masses_kg
            .iter()
            .zip(&config.load_conditions)
            .flat_map(|(&mass, label)| {
                config
                    .initial_velocities_kmh
                    .iter()
                    .map(move |&velocity| Self {
                        load_condition: label.clone(),
                        mass: Mass::new::<kilogram>(mass),
                        initial_velocity: Velocity::new::<kilometer_per_hour>(velocity),
                    })
            })
            .collect()
    }

    /// Human-readable name, e.g. `"25%, 300 km/h"`.
    #[must_use]
    pub fn name(&self) -> String {
        format!(
            "{}, {} km/h",
            self.load_condition,
            self.initial_velocity.get::<kilometer_per_hour>().round()
        )
    }

    /// Simulates this scenario with the given controller and loop config.
    ///
    /// # Errors
    ///
    /// Returns an error if the scenario or controller is invalid.
    pub fn simulate(
        &self,
        controller: &ControllerConfig,
        config: &braking::Config,
    ) -> Result<Solution, braking::Error> {
        braking::simulate_with(self.mass, self.initial_velocity, controller, config)
    }
}

/// A scenario together with its simulated run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioResult {
    pub scenario: Scenario,
    pub solution: Solution,
}

/// Simulates every scenario of `config` with a controller of kind `kind`.
///
/// Results are returned in enumeration order regardless of `execution`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or any run fails.
pub fn run_scenarios(
    config: &ScenarioConfig,
    kind: ControllerKind,
    execution: Execution,
) -> Result<Vec<ScenarioResult>, Error> {
    config.validate()?;
    let controller = config.controller_config(kind)?;
    let loop_config = config.simulation.to_config()?;
    let scenarios = Scenario::all(config);

    tracing::info!(
        controller = %kind,
        scenarios = scenarios.len(),
        ?execution,
        "running scenario sweep"
    );

    execution.try_map(&scenarios, |scenario| {
        let solution = scenario.simulate(&controller, &loop_config)?;
        Ok(ScenarioResult {
            scenario: scenario.clone(),
            solution,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use brakesim_simulation::braking::Status;
    use uom::si::time::second;

    fn small_config() -> ScenarioConfig {
        ScenarioConfig {
            masses_kg: vec![450_000.0, 510_000.0],
            load_conditions: vec!["empty".into(), "full".into()],
            initial_velocities_kmh: vec![200.0, 100.0],
            ..ScenarioConfig::default()
        }
    }

    #[test]
    fn enumerates_masses_then_velocities() {
        let names: Vec<_> = Scenario::all(&small_config())
            .iter()
            .map(Scenario::name)
            .collect();

        assert_eq!(
            names,
            [
                "empty, 200 km/h",
                "empty, 100 km/h",
                "full, 200 km/h",
                "full, 100 km/h"
            ]
        );
    }

    #[test]
    fn default_sweep_has_twenty_scenarios() {
        let scenarios = Scenario::all(&ScenarioConfig::default());
        assert_eq!(scenarios.len(), 20);
        assert_eq!(scenarios[0].name(), "0% (empty), 300 km/h");
        assert_relative_eq!(scenarios[19].mass.get::<kilogram>(), 510_000.0);
    }

    #[test]
    fn every_scenario_stops() {
        let results =
            run_scenarios(&small_config(), ControllerKind::OpenLoop, Execution::Sequential)
                .unwrap();

        assert_eq!(results.len(), 4);
        for result in &results {
            assert_eq!(result.solution.status, Status::Stopped);
            assert_eq!(result.solution.controller, ControllerKind::OpenLoop);
        }

        // Same mass: a faster start takes longer to stop.
        let fast = results[0].solution.stopping_time().unwrap();
        let slow = results[1].solution.stopping_time().unwrap();
        assert!(fast.get::<second>() > slow.get::<second>());
    }

    #[test]
    fn parallel_and_sequential_runs_agree() {
        let config = small_config();
        let parallel =
            run_scenarios(&config, ControllerKind::ClosedLoop, Execution::Parallel).unwrap();
        let sequential =
            run_scenarios(&config, ControllerKind::ClosedLoop, Execution::Sequential).unwrap();

        assert_eq!(parallel, sequential);
    }

    #[test]
    fn invalid_config_fails_before_running() {
        let config = ScenarioConfig {
            load_conditions: vec!["only one".into()],
            ..small_config()
        };

        let err = run_scenarios(&config, ControllerKind::OpenLoop, Execution::Sequential)
            .unwrap_err();
        assert!(matches!(err, Error::MismatchedLabels { .. }));
    }
}
