use std::convert::Infallible;

/// A fixed-size state of `N` real components.
///
/// For a pendulum this is `[angle, angular_velocity]`, but the dimensionality
/// is a compile-time parameter so the same integrators serve any `N`.
pub type StateVector<const N: usize> = [f64; N];

/// The right-hand side of a state-space model `dx/dt = f(x, t)`.
///
/// Adaptive integrators evaluate [`OdeSystem::derivative`] at times they choose
/// internally, which generally fall between (and occasionally just outside)
/// the times a caller asked to have reported. Implementations must therefore
/// accept any finite `time`, and must not mutate shared state: the same system
/// is evaluated many times per step, and possibly for rejected trial steps.
///
/// Any closure `Fn(&[f64; N], f64) -> [f64; N]` is an infallible system.
///
/// # Example
///
/// ```
/// use swing_core::OdeSystem;
///
/// // Exponential decay: dx/dt = -x.
/// let decay = |x: &[f64; 1], _t: f64| [-x[0]];
/// let dxdt = decay.derivative(&[2.0], 0.0).unwrap();
/// assert_eq!(dxdt, [-2.0]);
/// ```
pub trait OdeSystem<const N: usize> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Computes the time derivative of `state` at `time`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be evaluated.
    fn derivative(
        &self,
        state: &StateVector<N>,
        time: f64,
    ) -> Result<StateVector<N>, Self::Error>;
}

impl<F, const N: usize> OdeSystem<N> for F
where
    F: Fn(&StateVector<N>, f64) -> StateVector<N>,
{
    type Error = Infallible;

    fn derivative(
        &self,
        state: &StateVector<N>,
        time: f64,
    ) -> Result<StateVector<N>, Self::Error> {
        Ok(self(state, time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("state left the valid domain")]
    struct OutOfDomain;

    /// Logistic growth that refuses negative populations.
    struct Logistic {
        rate: f64,
        capacity: f64,
    }

    impl OdeSystem<1> for Logistic {
        type Error = OutOfDomain;

        fn derivative(&self, state: &[f64; 1], _time: f64) -> Result<[f64; 1], OutOfDomain> {
            let [p] = *state;
            if p < 0.0 {
                return Err(OutOfDomain);
            }
            Ok([self.rate * p * (1.0 - p / self.capacity)])
        }
    }

    #[test]
    fn closure_is_a_system() {
        let oscillator = |x: &[f64; 2], _t: f64| [x[1], -x[0]];
        assert_eq!(oscillator.derivative(&[1.0, 0.5], 3.0).unwrap(), [0.5, -1.0]);
    }

    #[test]
    fn closure_can_depend_on_time() {
        let ramp = |_x: &[f64; 1], t: f64| [2.0 * t];
        assert_eq!(ramp.derivative(&[0.0], 1.5).unwrap(), [3.0]);
    }

    #[test]
    fn fallible_system_reports_errors() {
        let model = Logistic {
            rate: 0.5,
            capacity: 10.0,
        };
        assert_eq!(model.derivative(&[5.0], 0.0).unwrap(), [1.25]);
        assert!(model.derivative(&[-1.0], 0.0).is_err());
    }
}
