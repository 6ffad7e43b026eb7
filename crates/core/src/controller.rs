//! Brake control strategies.
//!
//! A [`BrakeController`] turns the observed velocity into a control signal
//! once per timestep, and knows how that signal maps onto a brake force
//! demand. The simulation loop only sees this contract, so it stays agnostic
//! of which strategy drives it.

mod config;
mod constant_force;
mod pid;

use uom::si::f64::{Force, Mass, Time, Velocity};

use crate::ConfigError;

pub use config::{ControllerConfig, ControllerKind, ControllerParams};
pub use constant_force::ConstantForce;
pub use pid::{Pid, PidGains};

/// A brake control strategy with per-run internal state.
pub trait BrakeController {
    /// Returns which kind of strategy this is.
    fn kind(&self) -> ControllerKind;

    /// Computes the control signal for the current velocity.
    ///
    /// Called exactly once per timestep with the fixed, positive step size.
    fn compute(&mut self, velocity: Velocity, dt: Time) -> f64;

    /// Restores the controller to its freshly constructed state.
    fn reset(&mut self);

    /// Converts a control signal into a non-negative brake force demand.
    ///
    /// The demand is not yet limited by what the brakes can deliver.
    fn brake_force(&self, signal: f64, mass: Mass) -> Force;
}

impl<T: BrakeController + ?Sized> BrakeController for &mut T {
    fn kind(&self) -> ControllerKind {
        (**self).kind()
    }

    fn compute(&mut self, velocity: Velocity, dt: Time) -> f64 {
        (**self).compute(velocity, dt)
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn brake_force(&self, signal: f64, mass: Mass) -> Force {
        (**self).brake_force(signal, mass)
    }
}

impl<T: BrakeController + ?Sized> BrakeController for Box<T> {
    fn kind(&self) -> ControllerKind {
        (**self).kind()
    }

    fn compute(&mut self, velocity: Velocity, dt: Time) -> f64 {
        (**self).compute(velocity, dt)
    }

    fn reset(&mut self) {
        (**self).reset();
    }

    fn brake_force(&self, signal: f64, mass: Mass) -> Force {
        (**self).brake_force(signal, mass)
    }
}

/// A controller selected at runtime from a [`ControllerConfig`].
#[derive(Debug, Clone, PartialEq)]
pub enum Controller {
    ClosedLoop(Pid),
    OpenLoop(ConstantForce),
}

impl Controller {
    /// Builds the controller described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configured gains or force are invalid.
    pub fn from_config(config: &ControllerConfig) -> Result<Self, ConfigError> {
        match *config {
            ControllerConfig::ClosedLoop(gains) => {
                let gains = PidGains::new(gains.kp, gains.ki, gains.kd)?;
                Ok(Self::ClosedLoop(Pid::new(gains)))
            }
            ControllerConfig::OpenLoop {
                constant_brake_force,
            } => Ok(Self::OpenLoop(ConstantForce::new(constant_brake_force)?)),
        }
    }
}

impl From<Pid> for Controller {
    fn from(pid: Pid) -> Self {
        Self::ClosedLoop(pid)
    }
}

impl From<ConstantForce> for Controller {
    fn from(controller: ConstantForce) -> Self {
        Self::OpenLoop(controller)
    }
}

impl BrakeController for Controller {
    fn kind(&self) -> ControllerKind {
        match self {
            Self::ClosedLoop(pid) => pid.kind(),
            Self::OpenLoop(constant) => constant.kind(),
        }
    }

    fn compute(&mut self, velocity: Velocity, dt: Time) -> f64 {
        match self {
            Self::ClosedLoop(pid) => pid.compute(velocity, dt),
            Self::OpenLoop(constant) => constant.compute(velocity, dt),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::ClosedLoop(pid) => pid.reset(),
            Self::OpenLoop(constant) => constant.reset(),
        }
    }

    fn brake_force(&self, signal: f64, mass: Mass) -> Force {
        match self {
            Self::ClosedLoop(pid) => pid.brake_force(signal, mass),
            Self::OpenLoop(constant) => constant.brake_force(signal, mass),
        }
    }
}
