use uom::si::{
    f64::{Force, Mass, Time, Velocity},
    force::newton,
    mass::kilogram,
    time::second,
    velocity::meter_per_second,
};

use crate::{BrakeController, ConfigError, ControllerKind, validate};

/// Bound on the integral accumulator unless overridden.
pub const DEFAULT_INTEGRAL_LIMIT: f64 = 1000.0;

/// Proportional, integral and derivative gains of a [`Pid`] controller.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PidGains {
    pub kp: f64,
    pub ki: f64,
    pub kd: f64,
}

impl PidGains {
    /// Creates a gain set, checking that every gain is finite.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFinite`] naming the first non-finite gain.
    pub fn new(kp: f64, ki: f64, kd: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            kp: validate::finite("kp", kp)?,
            ki: validate::finite("ki", ki)?,
            kd: validate::finite("kd", kd)?,
        })
    }
}

/// Gains tuned for a 450–510 t trainset braking from up to 300 km/h.
impl Default for PidGains {
    fn default() -> Self {
        Self {
            kp: 0.025,
            ki: 0.0001,
            kd: 0.1,
        }
    }
}

/// Closed-loop PID brake controller targeting standstill.
///
/// The error is measured in m/s against a setpoint of zero, so it is never
/// positive while the train moves. The integral accumulator is clamped to
/// `±integral_limit` after every update (anti-windup), which keeps the long
/// high-speed phase from saturating the integral term.
///
/// The output is an acceleration-like signal; the brake force demand is
/// `|signal| * mass`.
#[derive(Debug, Clone, PartialEq)]
pub struct Pid {
    gains: PidGains,
    setpoint: Velocity,
    integral_limit: f64,
    integral: f64,
    previous_error: f64,
}

impl Pid {
    /// Creates a PID controller with the given gains and zeroed state.
    #[must_use]
    pub fn new(gains: PidGains) -> Self {
        Self {
            gains,
            setpoint: Velocity::new::<meter_per_second>(0.0),
            integral_limit: DEFAULT_INTEGRAL_LIMIT,
            integral: 0.0,
            previous_error: 0.0,
        }
    }

    /// Returns `self` with a different anti-windup bound.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the limit is not finite and positive.
    pub fn with_integral_limit(self, limit: f64) -> Result<Self, ConfigError> {
        let integral_limit = validate::positive("integral limit", limit)?;
        Ok(Self {
            integral_limit,
            ..self
        })
    }

    #[must_use]
    pub fn gains(&self) -> PidGains {
        self.gains
    }

    #[must_use]
    pub fn setpoint(&self) -> Velocity {
        self.setpoint
    }

    #[must_use]
    pub fn integral_limit(&self) -> f64 {
        self.integral_limit
    }

    /// Returns the current value of the integral accumulator.
    #[must_use]
    pub fn integral(&self) -> f64 {
        self.integral
    }

    /// Returns the error seen by the most recent [`compute`](BrakeController::compute).
    #[must_use]
    pub fn previous_error(&self) -> f64 {
        self.previous_error
    }
}

impl BrakeController for Pid {
    fn kind(&self) -> ControllerKind {
        ControllerKind::ClosedLoop
    }

    fn compute(&mut self, velocity: Velocity, dt: Time) -> f64 {
        let error = (self.setpoint - velocity).get::<meter_per_second>();
        let dt = dt.get::<second>();

        self.integral = (self.integral + error * dt).clamp(-self.integral_limit, self.integral_limit);
        let derivative = (error - self.previous_error) / dt;

        let PidGains { kp, ki, kd } = self.gains;
        let output = kp * error + ki * self.integral + kd * derivative;

        self.previous_error = error;
        output
    }

    fn reset(&mut self) {
        self.integral = 0.0;
        self.previous_error = 0.0;
    }

    fn brake_force(&self, signal: f64, mass: Mass) -> Force {
        Force::new::<newton>(signal.abs() * mass.get::<kilogram>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn mps(value: f64) -> Velocity {
        Velocity::new::<meter_per_second>(value)
    }

    fn seconds(value: f64) -> Time {
        Time::new::<second>(value)
    }

    #[test]
    fn proportional_only() {
        let mut pid = Pid::new(PidGains::new(2.0, 0.0, 0.0).unwrap());
        assert_relative_eq!(pid.compute(mps(3.0), seconds(0.1)), -6.0);
    }

    #[test]
    fn integral_accumulates_error_times_dt() {
        let mut pid = Pid::new(PidGains::new(0.0, 1.0, 0.0).unwrap());

        pid.compute(mps(2.0), seconds(0.5));
        let out = pid.compute(mps(2.0), seconds(0.5));

        assert_relative_eq!(pid.integral(), -2.0);
        assert_relative_eq!(out, -2.0);
    }

    #[test]
    fn derivative_uses_previous_error() {
        let mut pid = Pid::new(PidGains::new(0.0, 0.0, 1.0).unwrap());

        // First call differentiates against the zeroed previous error.
        assert_relative_eq!(pid.compute(mps(1.0), seconds(0.5)), -2.0);
        assert_relative_eq!(pid.previous_error(), -1.0);

        // Error goes from -1 to -0.5 over 0.5 s.
        assert_relative_eq!(pid.compute(mps(0.5), seconds(0.5)), 1.0);
    }

    #[test]
    fn first_output_of_default_gains_at_300_kmh() {
        let mut pid = Pid::new(PidGains::default());
        let v = 300.0 / 3.6;
        let dt = 0.01;

        let error = -v;
        let expected = 0.025 * error + 0.0001 * (error * dt) + 0.1 * (error / dt);

        assert_relative_eq!(pid.compute(mps(v), seconds(dt)), expected, epsilon = 1e-9);
    }

    #[test]
    fn integral_never_exceeds_limit() {
        let mut pid = Pid::new(PidGains::new(1e6, 1e6, 1e6).unwrap());

        for _ in 0..100_000 {
            pid.compute(mps(1e4), seconds(0.01));
            assert!(pid.integral().abs() <= DEFAULT_INTEGRAL_LIMIT);
        }
        assert_relative_eq!(pid.integral(), -DEFAULT_INTEGRAL_LIMIT);
    }

    #[test]
    fn custom_integral_limit() {
        let mut pid = Pid::new(PidGains::default())
            .with_integral_limit(5.0)
            .unwrap();

        for _ in 0..1000 {
            pid.compute(mps(100.0), seconds(0.1));
        }
        assert_relative_eq!(pid.integral(), -5.0);

        assert!(Pid::new(PidGains::default()).with_integral_limit(0.0).is_err());
    }

    #[test]
    fn reset_matches_fresh_controller() {
        let gains = PidGains::new(0.3, 0.02, 0.05).unwrap();
        let mut used = Pid::new(gains);

        for v in [80.0, 60.0, 30.0, 5.0] {
            used.compute(mps(v), seconds(0.01));
        }
        used.reset();

        let mut fresh = Pid::new(gains);
        assert_eq!(used, fresh);
        assert_eq!(
            used.compute(mps(42.0), seconds(0.01)),
            fresh.compute(mps(42.0), seconds(0.01))
        );
        assert_eq!(used.gains(), gains);
    }

    #[test]
    fn brake_force_scales_signal_magnitude_by_mass() {
        let pid = Pid::new(PidGains::default());
        let mass = Mass::new::<kilogram>(450_000.0);

        assert_relative_eq!(pid.brake_force(-0.1, mass).get::<newton>(), 45_000.0, epsilon = 1e-6);
        assert_relative_eq!(pid.brake_force(0.1, mass).get::<newton>(), 45_000.0, epsilon = 1e-6);
    }

    #[test]
    fn rejects_non_finite_gains() {
        assert!(matches!(
            PidGains::new(0.1, f64::INFINITY, 0.0),
            Err(ConfigError::NotFinite { name: "ki", .. })
        ));
    }
}
