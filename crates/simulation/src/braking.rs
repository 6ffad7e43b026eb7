//! Fixed-step braking simulation.
//!
//! A run advances the train with a fixed `dt` until it reaches the stop
//! threshold or the time budget is exhausted:
//!
//! ```text
//! signal  = controller.compute(v_n, dt)
//! F_n     = min(controller.brake_force(signal), F_max)
//! a_n     = physics.acceleration(v_n, F_n)
//! v_{n+1} = max(v_n + a_n * dt, 0)
//! d_{n+1} = d_n + v_{n+1} * dt
//! ```
//!
//! # Example
//!
//! ```ignore
//! use brakesim_simulation::braking;
//!
//! let solution = braking::simulate(mass, initial_velocity, &controller_config)?;
//!
//! if let Some(t) = solution.stopping_time() {
//!     println!("stopped after {} s", t.get::<second>());
//! }
//! ```

mod action;
mod config;
mod error;
mod event;
mod sample;
mod solution;

pub use action::Action;
pub use config::Config;
pub use error::Error;
pub use event::Event;
pub use sample::{Sample, StopEvent};
pub use solution::{Solution, Status};

use brakesim_core::{
    BrakeController, ControllerConfig, Motion, Observer, StepIntegrable, TrainPhysics, validate,
};
use uom::si::{
    f64::{Mass, Time, Velocity},
    length::meter,
    time::second,
    velocity::meter_per_second,
};

/// Upper bound on the samples reserved up front for a single run.
const MAX_RESERVED_SAMPLES: usize = 1 << 16;

/// Simulates one braking run with the default [`Config`].
///
/// Builds a fresh [`TrainPhysics`] for `mass` and a fresh controller from
/// `controller`, so repeated calls with the same arguments return identical
/// solutions.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if the mass, initial velocity or
/// controller parameters are invalid.
pub fn simulate(
    mass: Mass,
    initial_velocity: Velocity,
    controller: &ControllerConfig,
) -> Result<Solution, Error> {
    simulate_with(mass, initial_velocity, controller, &Config::default())
}

/// Simulates one braking run with explicit loop parameters.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if the mass, initial velocity or
/// controller parameters are invalid.
pub fn simulate_with(
    mass: Mass,
    initial_velocity: Velocity,
    controller: &ControllerConfig,
    config: &Config,
) -> Result<Solution, Error> {
    let physics = TrainPhysics::new(mass)?;
    let mut controller = controller.build()?;

    run(&physics, &mut controller, initial_velocity, config, ())
}

/// Runs the braking loop with caller-supplied physics, controller and observer.
///
/// # Algorithm
///
/// 1. Validate the initial velocity and reset the controller.
/// 2. While `time < max_time` and `velocity > stop_threshold`:
///    - Query the controller for a signal and convert it into a brake force
///      limited by the physics model.
///    - Compute the acceleration and record a [`Sample`] of the state at the
///      start of the step.
///    - Step the [`Motion`] forward and advance time by `dt`.
///    - Record the [`StopEvent`] the first time velocity reaches the threshold.
///    - Emit an [`Event`]; if the observer returns `StopEarly`, terminate.
/// 3. Return the solution with the full sample history.
///
/// # Errors
///
/// Returns [`Error::InvalidConfiguration`] if the initial velocity is negative
/// or not finite. Nothing is integrated and the controller is untouched.
pub fn run<C, Obs>(
    physics: &TrainPhysics,
    controller: &mut C,
    initial_velocity: Velocity,
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    C: BrakeController + ?Sized,
    Obs: Observer<Event, Action>,
{
    validate::non_negative(
        "initial velocity",
        initial_velocity.get::<meter_per_second>(),
    )?;
    controller.reset();

    let dt = config.dt();
    let max_time = config.max_time();
    let threshold = config.stop_threshold();

    let mut time = Time::new::<second>(0.0);
    let mut motion = Motion::starting_at(initial_velocity);
    let mut samples = Vec::with_capacity(config.max_steps().min(MAX_RESERVED_SAMPLES));
    let mut stop = None;
    let mut stopped_by_observer = false;

    while time < max_time && motion.velocity > threshold {
        let signal = controller.compute(motion.velocity, dt);
        let brake_force = physics.limit_brake_force(controller.brake_force(signal, physics.mass()));
        let acceleration = physics.acceleration(motion.velocity, brake_force);

        let sample = Sample {
            time,
            velocity: motion.velocity,
            distance: motion.distance,
            brake_force,
            acceleration,
        };
        samples.push(sample);

        motion = motion.step(acceleration, dt);
        time += dt;

        if stop.is_none() && motion.velocity <= threshold {
            stop = Some(StopEvent {
                time,
                distance: motion.distance,
            });
        }

        let event = Event {
            step: samples.len(),
            sample,
            time,
            motion,
            stop,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            stopped_by_observer = true;
            break;
        }
    }

    let status = if stop.is_some() {
        Status::Stopped
    } else if stopped_by_observer {
        Status::StoppedByObserver
    } else if samples.is_empty() {
        Status::AtRest
    } else {
        Status::TimedOut
    };

    let solution = Solution {
        status,
        controller: controller.kind(),
        samples,
        stop,
        final_time: time,
        final_motion: motion,
    };
    log_outcome(&solution);

    Ok(solution)
}

fn log_outcome(solution: &Solution) {
    let controller = solution.controller;
    let steps = solution.steps();

    match (solution.status, solution.stop) {
        (Status::TimedOut, _) => tracing::warn!(
            %controller,
            steps,
            final_velocity_mps = solution.final_velocity().get::<meter_per_second>(),
            "braking run exhausted its time budget before stopping"
        ),
        (status, Some(stop)) => tracing::debug!(
            %controller,
            ?status,
            steps,
            stopping_time_s = stop.time.get::<second>(),
            stopping_distance_m = stop.distance.get::<meter>(),
            "braking run finished"
        ),
        (status, None) => tracing::debug!(%controller, ?status, steps, "braking run finished"),
    }
}
