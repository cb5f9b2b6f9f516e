//! A pendulum driven by an external, time-varying force.
//!
//! The state is `[angle, angular_velocity]` with the angle measured from the
//! stable hanging equilibrium, so `[0, 0]` is the pendulum at rest. The
//! equations of motion are
//!
//! ```text
//! d(angle)/dt            = angular_velocity
//! d(angular_velocity)/dt = -(g / l) sin(angle) + F(t) / (m l)
//! ```
//!
//! where `F(t)` is read from a [`Signal`] at whatever time the integrator asks.

use std::convert::Infallible;

use swing_core::{OdeSystem, StateVector};
use thiserror::Error;
use uom::si::{
    acceleration::meter_per_second_squared,
    f64::{Acceleration, Length, Mass},
    length::meter,
    mass::kilogram,
};

use crate::signal::Signal;

/// Physical constants of the pendulum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParameters {
    gravity: Acceleration,
    length: Length,
    mass: Mass,
}

/// Errors that can occur when validating [`ModelParameters`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    #[error("gravity must be finite")]
    Gravity,

    #[error("length must be finite and positive")]
    Length,

    #[error("mass must be finite and positive")]
    Mass,
}

impl ModelParameters {
    /// Creates validated pendulum parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if gravity is not finite, or if length or mass is not
    /// finite and strictly positive.
    pub fn new(gravity: Acceleration, length: Length, mass: Mass) -> Result<Self, ParameterError> {
        if !gravity.value.is_finite() {
            return Err(ParameterError::Gravity);
        }
        if !length.value.is_finite() || length.value <= 0.0 {
            return Err(ParameterError::Length);
        }
        if !mass.value.is_finite() || mass.value <= 0.0 {
            return Err(ParameterError::Mass);
        }

        Ok(Self {
            gravity,
            length,
            mass,
        })
    }

    /// Creates validated parameters from SI values (m/s², m, kg).
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`ModelParameters::new`].
    pub fn si(gravity: f64, length: f64, mass: f64) -> Result<Self, ParameterError> {
        Self::new(
            Acceleration::new::<meter_per_second_squared>(gravity),
            Length::new::<meter>(length),
            Mass::new::<kilogram>(mass),
        )
    }

    #[must_use]
    pub fn gravity(&self) -> Acceleration {
        self.gravity
    }

    #[must_use]
    pub fn length(&self) -> Length {
        self.length
    }

    #[must_use]
    pub fn mass(&self) -> Mass {
        self.mass
    }

    /// Returns `g / l` in 1/s².
    fn stiffness(&self) -> f64 {
        self.gravity.get::<meter_per_second_squared>() / self.length.get::<meter>()
    }

    /// Returns `1 / (m l)` in 1/(kg·m), which converts force to angular acceleration.
    fn force_gain(&self) -> f64 {
        1.0 / (self.mass.get::<kilogram>() * self.length.get::<meter>())
    }
}

/// A pendulum whose pivot-normal force is given by a forcing [`Signal`].
///
/// The forcing signal is only ever read, so a borrowed
/// [`SignalTable`](crate::signal::SignalTable) can drive any number of
/// simulations at once.
#[derive(Debug, Clone)]
pub struct ForcedPendulum<S> {
    parameters: ModelParameters,
    forcing: S,
}

impl<S: Signal> ForcedPendulum<S> {
    /// Creates a pendulum driven by `forcing` (in newtons).
    pub fn new(parameters: ModelParameters, forcing: S) -> Self {
        Self {
            parameters,
            forcing,
        }
    }

    #[must_use]
    pub fn parameters(&self) -> &ModelParameters {
        &self.parameters
    }

    #[must_use]
    pub fn forcing(&self) -> &S {
        &self.forcing
    }
}

impl<S: Signal> OdeSystem<2> for ForcedPendulum<S> {
    type Error = Infallible;

    fn derivative(&self, state: &StateVector<2>, time: f64) -> Result<StateVector<2>, Infallible> {
        let [angle, angular_velocity] = *state;
        let force = self.forcing.value_at(time);

        Ok([
            angular_velocity,
            -self.parameters.stiffness() * angle.sin() + self.parameters.force_gain() * force,
        ])
    }
}
