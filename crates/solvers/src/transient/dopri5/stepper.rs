use swing_core::{OdeSystem, StateVector};

use super::{Config, Error, dense::DenseStep, tableau::*};

/// Outcome of one trial step, before the error test decides its fate.
pub(super) struct Trial<const N: usize> {
    /// Fifth-order solution at the end of the step.
    pub(super) state: StateVector<N>,

    /// Derivative at the end of the step (first stage of the next step).
    pub(super) derivative: StateVector<N>,

    /// RMS error estimate scaled by the tolerances; the step passes if `<= 1`.
    pub(super) error: f64,

    pub(super) dense: DenseStep<N>,
}

/// Evaluates the system on behalf of the solver and keeps count.
pub(super) struct Stepper<'a, S, const N: usize> {
    system: &'a S,
    rel_tol: f64,
    abs_tol: f64,
    pub(super) max_step: f64,
    pub(super) evaluations: usize,
}

impl<'a, S, const N: usize> Stepper<'a, S, N>
where
    S: OdeSystem<N>,
{
    pub(super) fn new(system: &'a S, config: &Config, span: f64) -> Self {
        Self {
            system,
            rel_tol: config.rel_tol(),
            abs_tol: config.abs_tol(),
            max_step: config.max_step().unwrap_or(span).min(span),
            evaluations: 0,
        }
    }

    pub(super) fn evaluate(
        &mut self,
        state: &StateVector<N>,
        time: f64,
    ) -> Result<StateVector<N>, Error> {
        self.evaluations += 1;
        self.system
            .derivative(state, time)
            .map_err(|err| Error::system(time, err))
    }

    /// Estimates a first step size from the size of the state and of its
    /// first and second derivatives, so the first trial is rarely rejected.
    pub(super) fn initial_step(
        &mut self,
        time: f64,
        state: &StateVector<N>,
        derivative: &StateVector<N>,
    ) -> Result<f64, Error> {
        let scale: StateVector<N> =
            std::array::from_fn(|i| self.abs_tol + self.rel_tol * state[i].abs());

        let dnf: f64 = (0..N).map(|i| (derivative[i] / scale[i]).powi(2)).sum();
        let dny: f64 = (0..N).map(|i| (state[i] / scale[i]).powi(2)).sum();

        let mut h = if dnf <= 1e-10 || dny <= 1e-10 {
            1e-6
        } else {
            (dny / dnf).sqrt() * 0.01
        };
        h = h.min(self.max_step);

        // Explicit Euler probe to estimate the second derivative.
        let probe: StateVector<N> = std::array::from_fn(|i| state[i] + h * derivative[i]);
        let probe_derivative = self.evaluate(&probe, time + h)?;

        let der2 = (0..N)
            .map(|i| ((probe_derivative[i] - derivative[i]) / scale[i]).powi(2))
            .sum::<f64>()
            .sqrt()
            / h;

        let der12 = der2.max(dnf.sqrt());
        let h1 = if der12 <= 1e-15 {
            (h * 1e-3).max(1e-6)
        } else {
            (0.01 / der12).powf(1.0 / f64::from(ORDER))
        };

        Ok((100.0 * h).min(h1).min(self.max_step))
    }

    /// Takes one trial step of size `h` from `(time, state)`.
    ///
    /// `k1` is the derivative at the start of the step, reused from the end
    /// of the previous accepted step.
    pub(super) fn attempt(
        &mut self,
        time: f64,
        state: &StateVector<N>,
        k1: &StateVector<N>,
        h: f64,
    ) -> Result<Trial<N>, Error> {
        let y = state;

        let y2 = std::array::from_fn(|i| y[i] + h * A21 * k1[i]);
        let k2 = self.evaluate(&y2, time + C2 * h)?;

        let y3 = std::array::from_fn(|i| y[i] + h * (A31 * k1[i] + A32 * k2[i]));
        let k3 = self.evaluate(&y3, time + C3 * h)?;

        let y4 = std::array::from_fn(|i| y[i] + h * (A41 * k1[i] + A42 * k2[i] + A43 * k3[i]));
        let k4 = self.evaluate(&y4, time + C4 * h)?;

        let y5 = std::array::from_fn(|i| {
            y[i] + h * (A51 * k1[i] + A52 * k2[i] + A53 * k3[i] + A54 * k4[i])
        });
        let k5 = self.evaluate(&y5, time + C5 * h)?;

        let y6 = std::array::from_fn(|i| {
            y[i] + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i])
        });
        let k6 = self.evaluate(&y6, time + h)?;

        let y7: StateVector<N> = std::array::from_fn(|i| {
            y[i] + h * (A71 * k1[i] + A73 * k3[i] + A74 * k4[i] + A75 * k5[i] + A76 * k6[i])
        });
        let k7 = self.evaluate(&y7, time + h)?;

        let error = self.error_norm(y, &y7, |i| {
            h * (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k7[i])
        });

        let change: StateVector<N> = std::array::from_fn(|i| y7[i] - y[i]);
        let slope_gap: StateVector<N> = std::array::from_fn(|i| h * k1[i] - change[i]);
        let dense = DenseStep {
            start: time,
            step_size: h,
            coefficients: [
                *y,
                change,
                slope_gap,
                std::array::from_fn(|i| change[i] - h * k7[i] - slope_gap[i]),
                std::array::from_fn(|i| {
                    let weighted = D1 * k1[i] + D3 * k3[i] + D4 * k4[i] + D5 * k5[i];
                    h * (weighted + D6 * k6[i] + D7 * k7[i])
                }),
            ],
        };

        Ok(Trial {
            state: y7,
            derivative: k7,
            error,
            dense,
        })
    }

    /// RMS of the local error estimate, each component scaled by its tolerance.
    fn error_norm(
        &self,
        start: &StateVector<N>,
        end: &StateVector<N>,
        local_error: impl Fn(usize) -> f64,
    ) -> f64 {
        let sum: f64 = (0..N)
            .map(|i| {
                let scale = self.abs_tol + self.rel_tol * start[i].abs().max(end[i].abs());
                (local_error(i) / scale).powi(2)
            })
            .sum();

        #[allow(clippy::cast_precision_loss)]
        let n = N.max(1) as f64;
        (sum / n).sqrt()
    }
}
