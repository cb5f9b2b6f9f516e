//! Adaptive Dormand–Prince 5(4) solver for ODE systems.
//!
//! # Algorithm
//!
//! Each step evaluates the system at six intermediate points and combines them
//! into a fifth-order solution and an embedded fourth-order one. Their
//! difference estimates the local error, which decides whether the step is
//! accepted and how large the next step should be:
//!
//! ```text
//! h_new = h / clamp(err^0.17 / err_prev^0.04 / 0.9, 0.1, 5)
//! ```
//!
//! The last stage of an accepted step is the first stage of the next (FSAL),
//! so an accepted step costs six evaluations.
//!
//! # Output times
//!
//! Step sizes are chosen for accuracy alone. Output times that fall inside an
//! accepted step are served by the step's continuous extension, so the system
//! is evaluated at solver-chosen times that generally differ from the output
//! times. A system driven by sampled data must therefore be able to read its
//! input at any time, which is what `SignalTable` in `swing-components` is
//! for.
//!
//! # Failure
//!
//! The solver either returns a fully populated [`Trajectory`] or an [`Error`].
//! When the stepper cannot meet the tolerance (step size underflow, too many
//! consecutive rejections, or the step budget runs out) it returns
//! [`Error::Integration`] with the last time and state it reached.
//!
//! # Observer Events
//!
//! The solver emits an [`Event::Accepted`] after each accepted step and an
//! [`Event::Rejected`] after each rejected trial. Observers can return
//! [`Action::StopEarly`] to halt, which yields [`Error::StoppedByObserver`].
//!
//! # Example
//!
//! ```
//! use swing_solvers::transient::dopri5::{self, Config};
//!
//! // Harmonic oscillator: x'' = -x, starting at x = 1 at rest.
//! let system = |x: &[f64; 2], _t: f64| [x[1], -x[0]];
//! let times: Vec<f64> = (0..=10_u32).map(|i| f64::from(i) * 0.1).collect();
//!
//! let trajectory = dopri5::solve_unobserved(&system, [1.0, 0.0], &times, &Config::default())
//!     .expect("should integrate");
//!
//! assert_eq!(trajectory.len(), times.len());
//! assert!((trajectory.final_state()[0] - 1.0_f64.cos()).abs() < 1e-7);
//! ```

mod action;
mod config;
mod dense;
mod error;
mod event;
mod input;
mod solution;
mod stepper;
mod tableau;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::{Error, FailureReason, IntegrationFailure};
pub use event::Event;
pub use input::InputError;
pub use solution::{Stats, Trajectory};

use swing_core::{Observer, OdeSystem, StateVector};

use stepper::Stepper;
use tableau::{BETA, ERROR_FLOOR, EXPO, FAC_MAX, FAC_MIN, SAFETY};

/// Integrates `system` from `initial` and reports the state at each of `times`.
///
/// `times[0]` is the start time and `times` must be non-decreasing. The first
/// reported state is `initial`; every later state approximates the solution of
/// `dx/dt = system(x, t)` at the corresponding output time.
///
/// The observer receives an [`Event`] per step attempt.
/// See the [module docs](self) for details.
///
/// # Errors
///
/// - [`Error::InvalidInput`] if fewer than two output times are given, they
///   are not finite and non-decreasing, or `initial` is not finite.
/// - [`Error::Integration`] if the adaptive stepper cannot meet the tolerance
///   within the configured budgets.
/// - [`Error::System`] if the system fails to evaluate.
/// - [`Error::StoppedByObserver`] if the observer returns [`Action::StopEarly`].
pub fn solve<S, Obs, const N: usize>(
    system: &S,
    initial: StateVector<N>,
    times: &[f64],
    config: &Config,
    mut observer: Obs,
) -> Result<Trajectory<N>, Error>
where
    S: OdeSystem<N>,
    Obs: for<'a> Observer<Event<'a, N>, Action>,
{
    input::validate(&initial, times)?;

    let start = times[0];
    let end = times[times.len() - 1];

    let mut states = Vec::with_capacity(times.len());
    let mut next = 0;
    while next < times.len() && times[next] <= start {
        states.push(initial);
        next += 1;
    }
    if next == times.len() {
        return Ok(Trajectory::new(times.to_vec(), states, Stats::default()));
    }

    let mut stepper = Stepper::new(system, config, end - start);

    let mut time = start;
    let mut state = initial;
    let mut derivative = stepper.evaluate(&state, time)?;
    let mut h = match config.first_step() {
        Some(first_step) => first_step.min(stepper.max_step),
        None => stepper.initial_step(time, &state, &derivative)?,
    };

    let mut attempts = 0;
    let mut accepted = 0;
    let mut rejected = 0;
    let mut consecutive_rejections = 0;
    let mut previous_error = ERROR_FLOOR;
    let mut just_rejected = false;

    let fail = |reason, time: f64, state: &StateVector<N>, steps| {
        let failure = IntegrationFailure {
            reason,
            time,
            state: state.to_vec(),
            steps,
        };
        log::warn!("{failure}");
        Error::Integration(failure)
    };

    loop {
        if attempts >= config.max_steps() {
            let reason = FailureReason::MaxStepsExceeded {
                limit: config.max_steps(),
            };
            return Err(fail(reason, time, &state, accepted));
        }

        // Land exactly on the last output time rather than stepping past it.
        let last = time + 1.01 * h >= end;
        if last {
            h = end - time;
        } else if 0.1 * h <= time.abs() * f64::EPSILON || h < f64::MIN_POSITIVE {
            let reason = FailureReason::StepSizeTooSmall { step_size: h };
            return Err(fail(reason, time, &state, accepted));
        }

        attempts += 1;
        let trial = stepper.attempt(time, &state, &derivative, h)?;
        let error = trial.error;

        if error.is_finite() && error <= 1.0 {
            let reached = if last { end } else { time + h };

            while next < times.len() && times[next] <= reached {
                let output = if times[next] >= reached {
                    trial.state
                } else {
                    trial.dense.evaluate(times[next])
                };
                states.push(output);
                next += 1;
            }

            let factor = (error.powf(EXPO) / previous_error.powf(BETA) / SAFETY)
                .clamp(1.0 / FAC_MAX, 1.0 / FAC_MIN);
            previous_error = error.max(ERROR_FLOOR);

            accepted += 1;
            consecutive_rejections = 0;
            time = reached;
            state = trial.state;
            derivative = trial.derivative;

            let event = Event::Accepted {
                step: accepted,
                time,
                step_size: h,
                error,
                state: &state,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return Err(Error::StoppedByObserver {
                    time,
                    state: state.to_vec(),
                });
            }

            if next == times.len() {
                break;
            }

            let mut h_new = (h / factor).min(stepper.max_step);
            if just_rejected {
                h_new = h_new.min(h);
                just_rejected = false;
            }
            h = h_new;
        } else {
            rejected += 1;
            consecutive_rejections += 1;
            just_rejected = true;
            log::debug!("rejected step at t = {time} with h = {h:e} (error {error:e})");

            let event = Event::Rejected {
                time,
                step_size: h,
                error,
            };
            if let Some(Action::StopEarly) = observer.observe(&event) {
                return Err(Error::StoppedByObserver {
                    time,
                    state: state.to_vec(),
                });
            }

            if consecutive_rejections > config.max_rejections() {
                let reason = FailureReason::TooManyRejections {
                    limit: config.max_rejections(),
                };
                return Err(fail(reason, time, &state, accepted));
            }

            // A non-finite estimate carries no size information; shrink maximally.
            h = if error.is_finite() {
                h / (1.0 / FAC_MIN).min(error.powf(EXPO) / SAFETY)
            } else {
                h * FAC_MIN
            };
        }
    }

    let stats = Stats {
        evaluations: stepper.evaluations,
        accepted,
        rejected,
    };
    log::debug!(
        "integrated [{start}, {end}] in {} steps ({} rejected, {} evaluations)",
        stats.accepted,
        stats.rejected,
        stats.evaluations
    );

    Ok(Trajectory::new(times.to_vec(), states, stats))
}

/// Integrates `system` without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns an error under the same conditions as [`solve`], except that it
/// never stops early.
pub fn solve_unobserved<S, const N: usize>(
    system: &S,
    initial: StateVector<N>,
    times: &[f64],
    config: &Config,
) -> Result<Trajectory<N>, Error>
where
    S: OdeSystem<N>,
{
    solve(system, initial, times, config, ())
}
