use brakesim_core::{ControllerKind, Motion};
use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Length, Time, Velocity},
    force::newton,
    length::meter,
    time::second,
    velocity::kilometer_per_hour,
};

use super::{Sample, StopEvent};

/// Indicates how a braking run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The train slowed to the stop threshold within the time budget.
    Stopped,

    /// The time budget ran out before the train reached the stop threshold.
    TimedOut,

    /// The initial velocity was already at or below the stop threshold, so no
    /// steps were taken.
    AtRest,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a braking run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// How the run terminated.
    pub status: Status,

    /// Which strategy controlled the brakes.
    pub controller: ControllerKind,

    /// One sample per step, recorded at the start of the step.
    pub samples: Vec<Sample>,

    /// Time and distance of the first step that reached the stop threshold.
    pub stop: Option<StopEvent>,

    /// Time at the end of the last step.
    pub final_time: Time,

    /// Motion at the end of the last step.
    pub final_motion: Motion,
}

impl Solution {
    /// Returns the number of integration steps taken.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn stopping_time(&self) -> Option<Time> {
        self.stop.map(|stop| stop.time)
    }

    #[must_use]
    pub fn stopping_distance(&self) -> Option<Length> {
        self.stop.map(|stop| stop.distance)
    }

    #[must_use]
    pub fn final_velocity(&self) -> Velocity {
        self.final_motion.velocity
    }

    /// Sample times in seconds.
    #[must_use]
    pub fn time_series(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.time.get::<second>()).collect()
    }

    /// Sample velocities in km/h.
    #[must_use]
    pub fn velocity_series(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| s.velocity.get::<kilometer_per_hour>())
            .collect()
    }

    /// Sample distances in meters.
    #[must_use]
    pub fn distance_series(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.distance.get::<meter>()).collect()
    }

    /// Applied brake forces in newtons.
    #[must_use]
    pub fn brake_force_series(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| s.brake_force.get::<newton>())
            .collect()
    }

    /// Accelerations in m/s².
    #[must_use]
    pub fn acceleration_series(&self) -> Vec<f64> {
        self.samples
            .iter()
            .map(|s| s.acceleration.get::<meter_per_second_squared>())
            .collect()
    }
}
