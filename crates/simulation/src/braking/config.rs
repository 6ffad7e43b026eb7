use brakesim_core::{ConfigError, validate};
use uom::si::{
    f64::{Time, Velocity},
    time::second,
    velocity::meter_per_second,
};

const DT_S: f64 = 0.01;
const MAX_TIME_S: f64 = 300.0;
const STOP_THRESHOLD_M_PER_S: f64 = 0.01;

/// Loop parameters for a braking run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    dt: Time,
    max_time: Time,
    stop_threshold: Velocity,
}

impl Default for Config {
    /// A 10 ms step, a 300 s budget and a 0.01 m/s stop threshold.
    fn default() -> Self {
        Self {
            dt: Time::new::<second>(DT_S),
            max_time: Time::new::<second>(MAX_TIME_S),
            stop_threshold: Velocity::new::<meter_per_second>(STOP_THRESHOLD_M_PER_S),
        }
    }
}

impl Config {
    /// Creates a new config with validated values.
    ///
    /// # Errors
    ///
    /// Returns an error if `dt` or `max_time` is not finite and positive, or if
    /// `stop_threshold` is negative or not finite.
    pub fn new(dt: Time, max_time: Time, stop_threshold: Velocity) -> Result<Self, ConfigError> {
        validate::positive("dt", dt.get::<second>())?;
        validate::positive("max time", max_time.get::<second>())?;
        validate::non_negative("stop threshold", stop_threshold.get::<meter_per_second>())?;

        Ok(Self {
            dt,
            max_time,
            stop_threshold,
        })
    }

    /// Returns the fixed integration step.
    #[must_use]
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Returns the simulated-time budget.
    #[must_use]
    pub fn max_time(&self) -> Time {
        self.max_time
    }

    /// Returns the velocity at or below which the train counts as stopped.
    #[must_use]
    pub fn stop_threshold(&self) -> Velocity {
        self.stop_threshold
    }

    /// Returns the number of steps needed to exhaust the time budget.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        let steps = (self.max_time.get::<second>() / self.dt.get::<second>()).ceil();
        // Saturating cast: only used as a capacity hint.
        steps as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = Config::default();
        assert_eq!(config.dt(), Time::new::<second>(0.01));
        assert_eq!(config.max_time(), Time::new::<second>(300.0));
        assert_eq!(
            config.stop_threshold(),
            Velocity::new::<meter_per_second>(0.01)
        );
        assert_eq!(config.max_steps(), 30_000);
    }

    #[test]
    fn rejects_invalid_values() {
        let dt = Time::new::<second>(0.01);
        let max_time = Time::new::<second>(300.0);
        let threshold = Velocity::new::<meter_per_second>(0.01);

        assert!(matches!(
            Config::new(Time::new::<second>(0.0), max_time, threshold),
            Err(ConfigError::NotPositive { name: "dt", .. })
        ));
        assert!(matches!(
            Config::new(dt, Time::new::<second>(-1.0), threshold),
            Err(ConfigError::NotPositive {
                name: "max time",
                ..
            })
        ));
        assert!(matches!(
            Config::new(dt, max_time, Velocity::new::<meter_per_second>(-0.01)),
            Err(ConfigError::Negative { .. })
        ));
        assert!(Config::new(dt, max_time, Velocity::new::<meter_per_second>(0.0)).is_ok());
    }
}
