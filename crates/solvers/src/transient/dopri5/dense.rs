use swing_core::StateVector;

/// Continuous extension of one accepted step.
///
/// A 4th-order polynomial in `theta = (t - start) / h` that matches the
/// step's endpoints, so output times inside a step are served without
/// constraining where the stepper puts its steps.
#[derive(Debug, Clone, Copy)]
pub(super) struct DenseStep<const N: usize> {
    pub(super) start: f64,
    pub(super) step_size: f64,
    pub(super) coefficients: [StateVector<N>; 5],
}

impl<const N: usize> DenseStep<N> {
    /// Evaluates the interpolating polynomial at `time`.
    pub(super) fn evaluate(&self, time: f64) -> StateVector<N> {
        let theta = (time - self.start) / self.step_size;
        let theta1 = 1.0 - theta;
        let [c0, c1, c2, c3, c4] = &self.coefficients;
        std::array::from_fn(|i| {
            c0[i] + theta * (c1[i] + theta1 * (c2[i] + theta * (c3[i] + theta1 * c4[i])))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn reproduces_step_endpoints() {
        // Endpoint coefficients for a step from 1.0 to 3.0 with states [2.0] and [5.0].
        let dense = DenseStep {
            start: 1.0,
            step_size: 2.0,
            coefficients: [[2.0], [3.0], [0.7], [-1.1], [0.4]],
        };
        assert_relative_eq!(dense.evaluate(1.0)[0], 2.0);
        assert_relative_eq!(dense.evaluate(3.0)[0], 5.0);
    }

    #[test]
    fn linear_step_interpolates_linearly() {
        let dense = DenseStep {
            start: 0.0,
            step_size: 1.0,
            coefficients: [[1.0, 0.0], [2.0, -1.0], [0.0; 2], [0.0; 2], [0.0; 2]],
        };
        let [a, b] = dense.evaluate(0.25);
        assert_relative_eq!(a, 1.5);
        assert_relative_eq!(b, -0.25);
    }
}
