use uom::si::{
    f64::{Acceleration, Length, Time, Velocity},
    length::meter,
    velocity::meter_per_second,
};

/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait lets the simulation loop advance a state via
/// `derivative * delta` without knowing how the state is laid out.
///
/// `Delta` can be a plain scalar like `f64` or a dimensioned type like
/// `uom::Time` for compile-time unit checking.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a `StepIntegrable` type.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

/// Longitudinal motion of the train: the integrated simulation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub velocity: Velocity,
    pub distance: Length,
}

impl Motion {
    /// Creates a motion state at the start of a run, with zero distance covered.
    #[must_use]
    pub fn starting_at(velocity: Velocity) -> Self {
        Self {
            velocity,
            distance: Length::new::<meter>(0.0),
        }
    }
}

/// Steps velocity with explicit Euler and distance with the updated velocity.
///
/// ```text
/// v_{n+1} = max(v_n + a_n * dt, 0)
/// d_{n+1} = d_n + v_{n+1} * dt
/// ```
///
/// Braking never reverses the direction of travel, so velocity is floored at
/// zero before it is used to advance the distance.
impl StepIntegrable<Time> for Motion {
    type Derivative = Acceleration;

    fn step(&self, acceleration: Acceleration, dt: Time) -> Self {
        let stopped = Velocity::new::<meter_per_second>(0.0);

        let velocity = self.velocity + acceleration * dt;
        let velocity = if velocity > stopped { velocity } else { stopped };
        let distance = self.distance + velocity * dt;

        Self { velocity, distance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{acceleration::meter_per_second_squared, time::second};

    fn motion(velocity: f64, distance: f64) -> Motion {
        Motion {
            velocity: Velocity::new::<meter_per_second>(velocity),
            distance: Length::new::<meter>(distance),
        }
    }

    #[test]
    fn starts_with_zero_distance() {
        let m = Motion::starting_at(Velocity::new::<meter_per_second>(12.0));
        assert_relative_eq!(m.velocity.get::<meter_per_second>(), 12.0);
        assert_relative_eq!(m.distance.get::<meter>(), 0.0);
    }

    #[test]
    fn distance_uses_updated_velocity() {
        let next = motion(10.0, 100.0).step(
            Acceleration::new::<meter_per_second_squared>(-2.0),
            Time::new::<second>(0.5),
        );

        // v = 10 - 2 * 0.5 = 9, d = 100 + 9 * 0.5 = 104.5
        assert_relative_eq!(next.velocity.get::<meter_per_second>(), 9.0);
        assert_relative_eq!(next.distance.get::<meter>(), 104.5);
    }

    #[test]
    fn velocity_never_goes_negative() {
        let next = motion(0.5, 20.0).step(
            Acceleration::new::<meter_per_second_squared>(-3.0),
            Time::new::<second>(1.0),
        );

        assert_relative_eq!(next.velocity.get::<meter_per_second>(), 0.0);
        assert_relative_eq!(next.distance.get::<meter>(), 20.0);
    }
}
