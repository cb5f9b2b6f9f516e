use swing_core::StateVector;
use thiserror::Error;

/// Errors in the initial state or output times passed to the solver.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("at least 2 output times are required (got {0})")]
    TooFewOutputTimes(usize),

    #[error("output time {index} is not finite")]
    NonFiniteOutputTime { index: usize },

    #[error("output times must be non-decreasing (violated at index {index})")]
    Decreasing { index: usize },

    #[error("initial state component {index} is not finite")]
    NonFiniteInitialState { index: usize },
}

/// Checks that the problem is well posed before any evaluation happens.
pub(super) fn validate<const N: usize>(
    initial: &StateVector<N>,
    times: &[f64],
) -> Result<(), InputError> {
    if times.len() < 2 {
        return Err(InputError::TooFewOutputTimes(times.len()));
    }
    if let Some(index) = times.iter().position(|t| !t.is_finite()) {
        return Err(InputError::NonFiniteOutputTime { index });
    }
    if let Some(index) = times.windows(2).position(|pair| pair[1] < pair[0]) {
        return Err(InputError::Decreasing { index: index + 1 });
    }
    if let Some(index) = initial.iter().position(|x| !x.is_finite()) {
        return Err(InputError::NonFiniteInitialState { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_decreasing_times() {
        assert_eq!(validate(&[0.0, 1.0], &[0.0, 0.5, 0.5, 2.0]), Ok(()));
        assert_eq!(validate(&[0.0], &[1.0, 1.0]), Ok(()));
    }

    #[test]
    fn requires_two_output_times() {
        assert_eq!(
            validate(&[0.0], &[0.0]),
            Err(InputError::TooFewOutputTimes(1))
        );
        assert_eq!(validate(&[0.0], &[]), Err(InputError::TooFewOutputTimes(0)));
    }

    #[test]
    fn rejects_decreasing_times() {
        assert_eq!(
            validate(&[0.0], &[0.0, 1.0, 0.5]),
            Err(InputError::Decreasing { index: 2 })
        );
    }

    #[test]
    fn rejects_non_finite_values() {
        assert_eq!(
            validate(&[0.0], &[0.0, f64::INFINITY]),
            Err(InputError::NonFiniteOutputTime { index: 1 })
        );
        assert_eq!(
            validate(&[0.0, f64::NAN], &[0.0, 1.0]),
            Err(InputError::NonFiniteInitialState { index: 1 })
        );
    }
}
