//! Fixed-step braking simulation for the brakesim workspace.
//!
//! The [`braking`] module couples a [`TrainPhysics`](brakesim_core::TrainPhysics)
//! model with a [`BrakeController`](brakesim_core::BrakeController) and
//! integrates the train's motion until it stops or the time budget runs out.

pub mod braking;
