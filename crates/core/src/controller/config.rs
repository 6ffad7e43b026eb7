use std::{fmt, str::FromStr};

use uom::si::{f64::Force, force::newton};

use crate::{ConfigError, Controller, PidGains, validate};

/// The two supported control strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum ControllerKind {
    /// Feedback control with a [`Pid`](crate::Pid) controller.
    ClosedLoop,
    /// Fixed brake force with a [`ConstantForce`](crate::ConstantForce) controller.
    OpenLoop,
}

impl ControllerKind {
    /// Returns the tag used for this kind in configuration and reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClosedLoop => "closed-loop",
            Self::OpenLoop => "open-loop",
        }
    }
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControllerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "closed-loop" => Ok(Self::ClosedLoop),
            "open-loop" => Ok(Self::OpenLoop),
            other => Err(ConfigError::UnknownControllerKind(other.to_owned())),
        }
    }
}

/// Loosely typed controller parameters, as read from a configuration file.
///
/// Only the fields required by the selected [`ControllerKind`] need to be set;
/// [`ControllerConfig::from_params`] checks that they are.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControllerParams {
    pub kp: Option<f64>,
    pub ki: Option<f64>,
    pub kd: Option<f64>,
    /// Open-loop brake force in newtons.
    pub constant_brake_force: Option<f64>,
}

/// A validated controller configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerConfig {
    ClosedLoop(PidGains),
    OpenLoop { constant_brake_force: Force },
}

impl ControllerConfig {
    /// Creates a closed-loop configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if any gain is not finite.
    pub fn closed_loop(gains: PidGains) -> Result<Self, ConfigError> {
        let gains = PidGains::new(gains.kp, gains.ki, gains.kd)?;
        Ok(Self::ClosedLoop(gains))
    }

    /// Creates an open-loop configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the force is not finite and positive.
    pub fn open_loop(constant_brake_force: Force) -> Result<Self, ConfigError> {
        validate::positive("constant brake force", constant_brake_force.get::<newton>())?;
        Ok(Self::OpenLoop {
            constant_brake_force,
        })
    }

    /// Builds a configuration from a kind and its loosely typed parameters.
    ///
    /// Parameters that the kind does not use are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingParameter`] if a required parameter is
    /// absent, or a validation error if a present one is out of range.
    pub fn from_params(kind: ControllerKind, params: &ControllerParams) -> Result<Self, ConfigError> {
        let require = |value: Option<f64>, parameter: &'static str| {
            value.ok_or(ConfigError::MissingParameter { kind, parameter })
        };

        match kind {
            ControllerKind::ClosedLoop => Self::closed_loop(PidGains {
                kp: require(params.kp, "kp")?,
                ki: require(params.ki, "ki")?,
                kd: require(params.kd, "kd")?,
            }),
            ControllerKind::OpenLoop => {
                let force = require(params.constant_brake_force, "constant_brake_force")?;
                Self::open_loop(Force::new::<newton>(force))
            }
        }
    }

    /// Parses the kind tag and builds a configuration from `params`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownControllerKind`] for an unrecognized tag,
    /// or any error from [`from_params`](Self::from_params).
    pub fn parse(kind: &str, params: &ControllerParams) -> Result<Self, ConfigError> {
        Self::from_params(kind.parse()?, params)
    }

    #[must_use]
    pub fn kind(&self) -> ControllerKind {
        match self {
            Self::ClosedLoop(_) => ControllerKind::ClosedLoop,
            Self::OpenLoop { .. } => ControllerKind::OpenLoop,
        }
    }

    /// Builds a fresh controller for one simulation run.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration holds invalid values.
    pub fn build(&self) -> Result<Controller, ConfigError> {
        Controller::from_config(self)
    }
}
