//! Core types for the brakesim braking simulator.
//!
//! This crate defines the pieces a braking simulation is assembled from:
//!
//! - [`TrainPhysics`] — longitudinal force model mapping velocity and brake
//!   force to deceleration
//! - [`BrakeController`] — the control strategy contract, with the closed-loop
//!   [`Pid`] and open-loop [`ConstantForce`] implementations
//! - [`Motion`] — the integrated state, stepped through [`StepIntegrable`]
//! - [`Observer`] — receives simulation events and optionally returns actions
//! - [`ConfigError`] — validation failures raised before any step runs

mod error;
mod observer;
mod step;

pub mod controller;
pub mod physics;
pub mod validate;

pub use controller::{
    BrakeController, ConstantForce, Controller, ControllerConfig, ControllerKind,
    ControllerParams, Pid, PidGains,
};
pub use error::ConfigError;
pub use observer::Observer;
pub use physics::{ResistiveForces, TrainPhysics};
pub use step::{DerivativeOf, Motion, StepIntegrable};
