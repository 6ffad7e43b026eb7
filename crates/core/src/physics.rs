//! Longitudinal force model of a braking train.
//!
//! [`TrainPhysics`] owns the train mass and the fixed physical coefficients of
//! a run. It is a pure function of its inputs: given a velocity and an applied
//! brake force it returns the resulting (non-positive) acceleration.

use uom::si::{
    acceleration::meter_per_second_squared,
    area::square_meter,
    f64::{Acceleration, Area, Force, Mass, MassDensity, Ratio, Velocity},
    force::newton,
    mass::kilogram,
    mass_density::kilogram_per_cubic_meter,
    ratio::ratio,
    velocity::meter_per_second,
};

use crate::{ConfigError, validate};

const ROLLING_RESISTANCE: f64 = 0.001;
const DRAG_COEFFICIENT: f64 = 0.5;
const FRONTAL_AREA_M2: f64 = 10.0;
const AIR_DENSITY_KG_PER_M3: f64 = 1.225;
const GRAVITY_M_PER_S2: f64 = 9.81;
const MAX_BRAKE_FORCE_N: f64 = 800_000.0;
const TAPER_SPEED_M_PER_S: f64 = 5.0;

/// Physical parameters of a train and the forces acting on it while braking.
///
/// # Force model
///
/// ```text
/// rolling = c_rr * m * g
/// drag    = 0.5 * rho * A * c_d * v^2
/// brake'  = brake * v / v_taper      if v < v_taper
///         = brake                    otherwise
/// a       = -(brake' + rolling + drag) / m
/// ```
///
/// Below the taper speed the applied brake force fades linearly to zero, so a
/// controller cannot drive the train into overshoot as it nears standstill.
///
/// # Examples
///
/// ```
/// use brakesim_core::TrainPhysics;
/// use uom::si::{
///     f64::{Force, Mass, Velocity},
///     force::newton,
///     mass::kilogram,
///     velocity::meter_per_second,
/// };
///
/// let physics = TrainPhysics::new(Mass::new::<kilogram>(450_000.0)).unwrap();
/// let a = physics.acceleration(
///     Velocity::new::<meter_per_second>(50.0),
///     Force::new::<newton>(400_000.0),
/// );
/// assert!(a.value < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainPhysics {
    mass: Mass,
    rolling_resistance: Ratio,
    drag_coefficient: Ratio,
    frontal_area: Area,
    air_density: MassDensity,
    gravity: Acceleration,
    max_brake_force: Force,
    taper_speed: Velocity,
}

/// Resistive forces that act on the train independently of the brakes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResistiveForces {
    pub rolling: Force,
    pub drag: Force,
}

impl ResistiveForces {
    /// Returns the sum of rolling resistance and aerodynamic drag.
    #[must_use]
    pub fn total(&self) -> Force {
        self.rolling + self.drag
    }
}

impl TrainPhysics {
    /// Creates a physics model for a train of the given mass.
    ///
    /// All other coefficients take the values of a typical high-speed trainset:
    /// rolling resistance 0.001, drag coefficient 0.5, frontal area 10 m²,
    /// air density 1.225 kg/m³, g = 9.81 m/s², maximum brake force 800 kN,
    /// and brake taper below 5 m/s.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the mass is not finite and positive.
    pub fn new(mass: Mass) -> Result<Self, ConfigError> {
        validate::positive("mass", mass.get::<kilogram>())?;

        Ok(Self {
            mass,
            rolling_resistance: Ratio::new::<ratio>(ROLLING_RESISTANCE),
            drag_coefficient: Ratio::new::<ratio>(DRAG_COEFFICIENT),
            frontal_area: Area::new::<square_meter>(FRONTAL_AREA_M2),
            air_density: MassDensity::new::<kilogram_per_cubic_meter>(AIR_DENSITY_KG_PER_M3),
            gravity: Acceleration::new::<meter_per_second_squared>(GRAVITY_M_PER_S2),
            max_brake_force: Force::new::<newton>(MAX_BRAKE_FORCE_N),
            taper_speed: Velocity::new::<meter_per_second>(TAPER_SPEED_M_PER_S),
        })
    }

    /// Returns `self` with the given rolling-resistance coefficient.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the coefficient is negative or not finite.
    pub fn with_rolling_resistance(self, coefficient: Ratio) -> Result<Self, ConfigError> {
        validate::non_negative("rolling resistance", coefficient.get::<ratio>())?;
        Ok(Self {
            rolling_resistance: coefficient,
            ..self
        })
    }

    /// Returns `self` with the given drag coefficient and frontal area.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either value is negative or not finite.
    pub fn with_drag(self, coefficient: Ratio, frontal_area: Area) -> Result<Self, ConfigError> {
        validate::non_negative("drag coefficient", coefficient.get::<ratio>())?;
        validate::non_negative("frontal area", frontal_area.get::<square_meter>())?;
        Ok(Self {
            drag_coefficient: coefficient,
            frontal_area,
            ..self
        })
    }

    /// Returns `self` with the given air density.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the density is negative or not finite.
    pub fn with_air_density(self, density: MassDensity) -> Result<Self, ConfigError> {
        validate::non_negative("air density", density.get::<kilogram_per_cubic_meter>())?;
        Ok(Self {
            air_density: density,
            ..self
        })
    }

    /// Returns `self` with the given gravitational acceleration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the value is negative or not finite.
    pub fn with_gravity(self, gravity: Acceleration) -> Result<Self, ConfigError> {
        validate::non_negative("gravity", gravity.get::<meter_per_second_squared>())?;
        Ok(Self { gravity, ..self })
    }

    /// Returns `self` with the given maximum brake force.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the force is not finite and positive.
    pub fn with_max_brake_force(self, force: Force) -> Result<Self, ConfigError> {
        validate::positive("max brake force", force.get::<newton>())?;
        Ok(Self {
            max_brake_force: force,
            ..self
        })
    }

    /// Returns `self` with the given brake taper speed.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the speed is not finite and positive.
    pub fn with_taper_speed(self, speed: Velocity) -> Result<Self, ConfigError> {
        validate::positive("taper speed", speed.get::<meter_per_second>())?;
        Ok(Self {
            taper_speed: speed,
            ..self
        })
    }

    #[must_use]
    pub fn mass(&self) -> Mass {
        self.mass
    }

    #[must_use]
    pub fn max_brake_force(&self) -> Force {
        self.max_brake_force
    }

    #[must_use]
    pub fn taper_speed(&self) -> Velocity {
        self.taper_speed
    }

    #[must_use]
    pub fn rolling_resistance(&self) -> Ratio {
        self.rolling_resistance
    }

    #[must_use]
    pub fn drag_coefficient(&self) -> Ratio {
        self.drag_coefficient
    }

    #[must_use]
    pub fn frontal_area(&self) -> Area {
        self.frontal_area
    }

    #[must_use]
    pub fn air_density(&self) -> MassDensity {
        self.air_density
    }

    #[must_use]
    pub fn gravity(&self) -> Acceleration {
        self.gravity
    }

    /// Computes rolling resistance and aerodynamic drag at `velocity`.
    #[must_use]
    pub fn resistive_forces(&self, velocity: Velocity) -> ResistiveForces {
        let rolling = self.rolling_resistance * self.mass * self.gravity;
        let drag = 0.5
            * self.air_density
            * self.frontal_area
            * self.drag_coefficient
            * velocity
            * velocity;

        ResistiveForces { rolling, drag }
    }

    /// Returns the brake force that actually acts on the train at `velocity`.
    ///
    /// Below the taper speed the commanded force is scaled by
    /// `velocity / taper_speed`.
    #[must_use]
    pub fn tapered_brake_force(&self, velocity: Velocity, brake_force: Force) -> Force {
        if velocity < self.taper_speed {
            brake_force * (velocity / self.taper_speed)
        } else {
            brake_force
        }
    }

    /// Clamps a commanded brake force magnitude to the maximum the brakes deliver.
    #[must_use]
    pub fn limit_brake_force(&self, demand: Force) -> Force {
        if self.max_brake_force < demand {
            self.max_brake_force
        } else {
            demand
        }
    }

    /// Computes the acceleration of the train under the given brake force.
    ///
    /// The result is negative whenever any force acts, since every force in the
    /// model opposes the direction of travel.
    #[must_use]
    pub fn acceleration(&self, velocity: Velocity, brake_force: Force) -> Acceleration {
        let ResistiveForces { rolling, drag } = self.resistive_forces(velocity);
        let brake_force = self.tapered_brake_force(velocity, brake_force);

        let total = brake_force + rolling + drag;
        -total / self.mass
    }
}
