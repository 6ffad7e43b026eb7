use std::{fs, path::Path};

use brakesim_core::{ConfigError, ControllerConfig, ControllerKind, ControllerParams, validate};
use brakesim_simulation::braking;
use serde::{Deserialize, Serialize};
use uom::si::{
    f64::{Time, Velocity},
    time::second,
    velocity::meter_per_second,
};

use crate::Error;

/// Everything needed to run a scenario sweep and a comparison.
///
/// Every field has a default, so a TOML file only needs the values it wants
/// to change:
///
/// ```toml
/// control_type = "open-loop"
/// initial_velocities_kmh = [300.0, 200.0]
///
/// [controller]
/// constant_brake_force = 700000.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Train masses in kilograms, one per load condition.
    pub masses_kg: Vec<f64>,

    /// Labels for the load conditions, aligned with `masses_kg`.
    pub load_conditions: Vec<String>,

    /// Initial velocities in km/h.
    pub initial_velocities_kmh: Vec<f64>,

    /// Controller used for the scenario sweep.
    pub control_type: ControllerKind,

    /// Controller parameters; each kind reads only the fields it needs.
    pub controller: ControllerParams,

    /// Initial velocity of the closed-loop vs open-loop comparison, in km/h.
    pub comparison_velocity_kmh: f64,

    pub simulation: SimulationSettings,
}

/// Loop parameters in plain SI units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationSettings {
    pub dt_s: f64,
    pub max_time_s: f64,
    pub stop_threshold_mps: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        let config = braking::Config::default();
        Self {
            dt_s: config.dt().get::<second>(),
            max_time_s: config.max_time().get::<second>(),
            stop_threshold_mps: config.stop_threshold().get::<meter_per_second>(),
        }
    }
}

impl SimulationSettings {
    /// Converts the settings into a validated loop config.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any value is out of range.
    pub fn to_config(&self) -> Result<braking::Config, ConfigError> {
        braking::Config::new(
            Time::new::<second>(self.dt_s),
            Time::new::<second>(self.max_time_s),
            Velocity::new::<meter_per_second>(self.stop_threshold_mps),
        )
    }
}

/// Empty to fully loaded trainset, braking from 300, 250, 200 and 150 km/h.
impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            masses_kg: vec![450_000.0, 465_000.0, 480_000.0, 495_000.0, 510_000.0],
            load_conditions: ["0% (empty)", "25%", "50%", "75%", "100% (full)"]
                .into_iter()
                .map(String::from)
                .collect(),
            initial_velocities_kmh: vec![300.0, 250.0, 200.0, 150.0],
            control_type: ControllerKind::ClosedLoop,
            controller: ControllerParams {
                kp: Some(0.025),
                ki: Some(0.0001),
                kd: Some(0.1),
                constant_brake_force: Some(800_000.0),
            },
            comparison_velocity_kmh: 300.0,
            simulation: SimulationSettings::default(),
        }
    }
}

impl ScenarioConfig {
    /// Parses and validates a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this schema, or if
    /// the resulting configuration fails [`validate`](Self::validate).
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or any error from
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks that the sweep is well formed before anything is simulated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MismatchedLabels`] if masses and labels differ in
    /// length, or a [`ConfigError`] for out-of-range values or controller
    /// parameters missing for `control_type`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.masses_kg.len() != self.load_conditions.len() {
            return Err(Error::MismatchedLabels {
                masses: self.masses_kg.len(),
                labels: self.load_conditions.len(),
            });
        }
        for &mass in &self.masses_kg {
            validate::positive("mass", mass)?;
        }
        for &velocity in &self.initial_velocities_kmh {
            validate::non_negative("initial velocity", velocity)?;
        }
        validate::non_negative("comparison velocity", self.comparison_velocity_kmh)?;
        self.simulation.to_config()?;
        self.controller_config(self.control_type)?;
        Ok(())
    }

    /// Builds the controller config of the given kind from `controller`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a parameter required by `kind` is missing
    /// or invalid.
    pub fn controller_config(&self, kind: ControllerKind) -> Result<ControllerConfig, ConfigError> {
        ControllerConfig::from_params(kind, &self.controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use brakesim_core::PidGains;

    #[test]
    fn default_config_is_valid() {
        let config = ScenarioConfig::default();
        config.validate().unwrap();

        assert_eq!(
            config.controller_config(ControllerKind::ClosedLoop).unwrap(),
            ControllerConfig::ClosedLoop(PidGains::default())
        );
        assert_eq!(config.simulation.to_config().unwrap(), braking::Config::default());
    }

    #[test]
    fn empty_toml_yields_defaults() {
        assert_eq!(
            ScenarioConfig::from_toml_str("").unwrap(),
            ScenarioConfig::default()
        );
    }

    #[test]
    fn partial_toml_overrides_selected_fields() {
        let config = ScenarioConfig::from_toml_str(
            r#"
            control_type = "open-loop"
            initial_velocities_kmh = [300.0, 200.0]

            [controller]
            constant_brake_force = 700000.0

            [simulation]
            dt_s = 0.02
            "#,
        )
        .unwrap();

        assert_eq!(config.control_type, ControllerKind::OpenLoop);
        assert_eq!(config.initial_velocities_kmh, vec![300.0, 200.0]);
        assert_eq!(config.controller.constant_brake_force, Some(700_000.0));
        assert_eq!(config.controller.kp, None);
        assert_eq!(config.simulation.dt_s, 0.02);
        assert_eq!(config.simulation.max_time_s, 300.0);
        assert_eq!(config.masses_kg.len(), 5);
    }

    #[test]
    fn missing_gain_for_closed_loop_is_rejected() {
        let err = ScenarioConfig::from_toml_str(
            r#"
            control_type = "closed-loop"

            [controller]
            kp = 0.025
            kd = 0.1
            "#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingParameter { parameter: "ki", .. })
        ));
    }

    #[test]
    fn unknown_control_type_is_rejected() {
        let err = ScenarioConfig::from_toml_str(r#"control_type = "coast""#).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn mismatched_labels_are_rejected() {
        let err = ScenarioConfig::from_toml_str(
            r#"
            masses_kg = [450000.0, 510000.0]
            load_conditions = ["empty"]
            "#,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            Error::MismatchedLabels {
                masses: 2,
                labels: 1
            }
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = ScenarioConfig::from_toml_str(
            r#"
            masses_kg = [0.0]
            load_conditions = ["nothing"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NotPositive { .. })));

        let err = ScenarioConfig::from_toml_str("[simulation]\ndt_s = 0.0").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::NotPositive { name: "dt", .. })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ScenarioConfig::load("/nonexistent/brakesim.toml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/brakesim.toml"));
    }
}
