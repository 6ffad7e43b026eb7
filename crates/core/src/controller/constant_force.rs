use uom::si::{
    f64::{Force, Mass, Time, Velocity},
    force::newton,
};

use crate::{BrakeController, ConfigError, ControllerKind, validate};

/// Open-loop brake controller that always commands the same force.
///
/// The signal is the force itself in newtons, independent of the observed
/// velocity; there is no internal state to reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantForce {
    force: Force,
}

impl ConstantForce {
    /// Creates a constant-force controller.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the force is not finite and positive.
    pub fn new(force: Force) -> Result<Self, ConfigError> {
        validate::positive("constant brake force", force.get::<newton>())?;
        Ok(Self { force })
    }

    #[must_use]
    pub fn force(&self) -> Force {
        self.force
    }
}

impl BrakeController for ConstantForce {
    fn kind(&self) -> ControllerKind {
        ControllerKind::OpenLoop
    }

    fn compute(&mut self, _velocity: Velocity, _dt: Time) -> f64 {
        self.force.get::<newton>()
    }

    fn reset(&mut self) {}

    fn brake_force(&self, signal: f64, _mass: Mass) -> Force {
        Force::new::<newton>(signal.abs())
    }
}
