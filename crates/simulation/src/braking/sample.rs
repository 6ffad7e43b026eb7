use uom::si::f64::{Acceleration, Force, Length, Time, Velocity};

/// State of the train at the start of one timestep.
///
/// `brake_force` and `acceleration` are the values applied during the step
/// that begins at `time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: Time,
    pub velocity: Velocity,
    pub distance: Length,
    pub brake_force: Force,
    pub acceleration: Acceleration,
}

/// Time and distance at which the train first reached the stop threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopEvent {
    pub time: Time,
    pub distance: Length,
}
