use brakesim_core::Motion;
use uom::si::f64::Time;

use super::{Sample, StopEvent};

/// Event emitted to the observer after each integration step.
///
/// Steps are numbered from 1; no event is emitted for a run that takes no
/// steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// The step number (1..N).
    pub step: usize,

    /// State at the start of the step, with the force and acceleration applied.
    pub sample: Sample,

    /// Time at the end of the step.
    pub time: Time,

    /// Motion at the end of the step.
    pub motion: Motion,

    /// The stop event, once one has been recorded.
    pub stop: Option<StopEvent>,
}
