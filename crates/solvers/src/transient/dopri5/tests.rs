use super::*;

use std::f64::consts::PI;

use approx::assert_relative_eq;
use thiserror::Error;

// --- Test fixtures ---

fn uniform(start: f64, end: f64, count: u32) -> Vec<f64> {
    let step = (end - start) / f64::from(count - 1);
    (0..count).map(|i| start + f64::from(i) * step).collect()
}

fn decay(x: &[f64; 1], _t: f64) -> [f64; 1] {
    [-x[0]]
}

fn oscillator(x: &[f64; 2], _t: f64) -> [f64; 2] {
    [x[1], -x[0]]
}

#[derive(Debug, Error)]
#[error("singular at t = {0}")]
struct Singular(f64);

/// Exponential decay that refuses to evaluate past a cutoff time.
struct Cutoff {
    after: f64,
}

impl OdeSystem<1> for Cutoff {
    type Error = Singular;

    fn derivative(&self, state: &StateVector<1>, time: f64) -> Result<StateVector<1>, Singular> {
        if time > self.after {
            return Err(Singular(time));
        }
        Ok([-state[0]])
    }
}

// --- Accuracy ---

#[test]
fn exponential_decay() {
    let times = uniform(0.0, 5.0, 51);
    let trajectory = solve_unobserved(&decay, [1.0], &times, &Config::default()).unwrap();

    for (time, state) in trajectory.iter() {
        assert_relative_eq!(state[0], (-time).exp(), epsilon = 1e-7);
    }
}

#[test]
fn harmonic_oscillator_returns_after_one_period() {
    let trajectory =
        solve_unobserved(&oscillator, [1.0, 0.0], &[0.0, 2.0 * PI], &Config::default()).unwrap();

    let [x, v] = *trajectory.final_state();
    assert_relative_eq!(x, 1.0, epsilon = 1e-6);
    assert_relative_eq!(v, 0.0, epsilon = 1e-6);
}

#[test]
fn time_dependent_right_hand_side() {
    let system = |_x: &[f64; 1], t: f64| [t.cos()];
    let times = uniform(0.0, 10.0, 101);
    let trajectory = solve_unobserved(&system, [0.0], &times, &Config::default()).unwrap();

    for (time, state) in trajectory.iter() {
        assert_relative_eq!(state[0], time.sin(), epsilon = 1e-6);
    }
}

#[test]
fn output_grid_does_not_change_the_steps() {
    let sparse = solve_unobserved(&oscillator, [1.0, 0.0], &[0.0, 0.5, 1.0], &Config::default())
        .unwrap();

    let times: Vec<f64> = (0..=1000_u32).map(|i| f64::from(i) / 1000.0).collect();
    let dense = solve_unobserved(&oscillator, [1.0, 0.0], &times, &Config::default()).unwrap();

    assert_eq!(sparse.stats(), dense.stats());
    assert_eq!(sparse.final_state(), dense.final_state());
    assert_relative_eq!(sparse.states()[1][0], dense.states()[500][0], epsilon = 1e-6);
    assert_relative_eq!(sparse.states()[1][1], dense.states()[500][1], epsilon = 1e-6);
}

// --- Output layout ---

#[test]
fn one_state_per_output_time() {
    let times = [0.0, 0.0, 0.3, 0.3, 1.7, 2.0];
    let trajectory = solve_unobserved(&decay, [2.0], &times, &Config::default()).unwrap();

    assert_eq!(trajectory.len(), times.len());
    assert_eq!(trajectory.times(), &times);
    assert_eq!(trajectory.states()[0], [2.0]);
    assert_eq!(trajectory.states()[1], [2.0]);
    assert_eq!(trajectory.states()[2], trajectory.states()[3]);
    assert_relative_eq!(trajectory.states()[4][0], 2.0 * (-1.7_f64).exp(), epsilon = 1e-7);
    assert_eq!(trajectory.component(0).len(), times.len());
}

#[test]
fn degenerate_span_needs_no_evaluations() {
    let trajectory = solve_unobserved(&decay, [3.0], &[1.0, 1.0], &Config::default()).unwrap();

    assert_eq!(trajectory.states(), &[[3.0], [3.0]]);
    assert_eq!(trajectory.stats(), Stats::default());
}

#[test]
fn evaluation_count_matches_attempts() {
    let times = uniform(0.0, 3.0, 4);
    let stats = solve_unobserved(&oscillator, [1.0, 0.0], &times, &Config::default())
        .unwrap()
        .stats();

    // One evaluation at the start, one to size the first step, six per attempt.
    assert!(stats.accepted > 0);
    assert_eq!(stats.evaluations, 2 + 6 * (stats.accepted + stats.rejected));
}

#[test]
fn max_step_bounds_every_step() {
    let config = Config::default().with_max_step(0.05).unwrap();
    let mut largest: f64 = 0.0;
    let observer = |event: &Event<'_, 1>| -> Option<Action> {
        largest = largest.max(event.step_size());
        None
    };

    let trajectory = solve(&decay, [1.0], &[0.0, 1.0], &config, observer).unwrap();

    // The final step may stretch slightly to land on the end time.
    assert!(largest <= 0.05 * 1.01, "largest step {largest}");
    assert!(trajectory.stats().accepted >= 20);
}

// --- Invalid input ---

#[test]
fn rejects_a_single_output_time() {
    let result = solve_unobserved(&decay, [1.0], &[0.0], &Config::default());
    assert!(matches!(
        result,
        Err(Error::InvalidInput(InputError::TooFewOutputTimes(1)))
    ));
}

#[test]
fn rejects_decreasing_output_times() {
    let result = solve_unobserved(&decay, [1.0], &[0.0, 1.0, 0.5], &Config::default());
    assert!(matches!(
        result,
        Err(Error::InvalidInput(InputError::Decreasing { index: 2 }))
    ));
}

#[test]
fn rejects_non_finite_initial_state() {
    let result = solve_unobserved(&oscillator, [0.0, f64::NAN], &[0.0, 1.0], &Config::default());
    assert!(matches!(
        result,
        Err(Error::InvalidInput(InputError::NonFiniteInitialState { index: 1 }))
    ));
}

// --- Failures ---

#[test]
fn system_errors_are_propagated() {
    let system = Cutoff { after: 0.5 };
    let result = solve_unobserved(&system, [1.0], &[0.0, 1.0], &Config::default());

    let Err(Error::System { time, source }) = result else {
        panic!("expected a system error");
    };
    assert!(time > 0.5);
    let singular = source.downcast_ref::<Singular>().expect("source is the system error");
    assert_relative_eq!(singular.0, time);
}

#[test]
fn step_budget_is_enforced() {
    let config = Config::default().with_max_steps(5);
    let result = solve_unobserved(&decay, [1.0], &[0.0, 100.0], &config);

    let Err(Error::Integration(failure)) = result else {
        panic!("expected an integration failure");
    };
    assert_eq!(failure.reason, FailureReason::MaxStepsExceeded { limit: 5 });
    assert!(failure.time > 0.0 && failure.time < 100.0);
    assert_eq!(failure.state.len(), 1);
}

#[test]
fn persistent_rejection_gives_up() {
    let system = |x: &[f64; 1], t: f64| if t > 0.0 { [f64::NAN] } else { [-x[0]] };
    let config = Config::default()
        .with_max_rejections(3)
        .with_first_step(1e-3)
        .unwrap();

    let mut rejections = 0;
    let observer = |event: &Event<'_, 1>| -> Option<Action> {
        if let Event::Rejected { error, .. } = event {
            assert!(error.is_nan());
            rejections += 1;
        }
        None
    };
    let result = solve(&system, [1.0], &[0.0, 1.0], &config, observer);

    let Err(Error::Integration(failure)) = result else {
        panic!("expected an integration failure");
    };
    assert_eq!(failure.reason, FailureReason::TooManyRejections { limit: 3 });
    assert_relative_eq!(failure.time, 0.0);
    assert_eq!(failure.state, vec![1.0]);
    assert_eq!(failure.steps, 0);
    assert_eq!(rejections, 4);
}

#[test]
fn step_size_underflow_is_detected() {
    let config = Config::default().with_first_step(1e-12).unwrap();
    let result = solve_unobserved(&decay, [1.0], &[1e6, 1e6 + 1.0], &config);

    let Err(Error::Integration(failure)) = result else {
        panic!("expected an integration failure");
    };
    assert!(matches!(
        failure.reason,
        FailureReason::StepSizeTooSmall { .. }
    ));
    assert_relative_eq!(failure.time, 1e6);
    assert_eq!(failure.steps, 0);
}

#[test]
fn short_span_far_from_the_origin_lands_in_one_step() {
    let start = 1e6;
    let end = start + 1e-9;
    let trajectory = solve_unobserved(&decay, [1.0], &[start, end], &Config::default()).unwrap();

    assert_eq!(trajectory.stats().accepted, 1);
    assert_relative_eq!(trajectory.final_state()[0], (start - end).exp(), epsilon = 1e-12);
}

#[test]
fn finite_time_blow_up_fails_near_the_singularity() {
    // dx/dt = x² with x(0) = 1 has the solution 1 / (1 - t).
    let system = |x: &[f64; 1], _t: f64| [x[0] * x[0]];
    let result = solve_unobserved(&system, [1.0], &[0.0, 2.0], &Config::default());

    let Err(Error::Integration(failure)) = result else {
        panic!("expected an integration failure");
    };
    // Global error shifts the numerical pole by about the tolerance.
    assert!(matches!(
        failure.reason,
        FailureReason::StepSizeTooSmall { .. }
    ));
    assert!((failure.time - 1.0).abs() < 1e-6, "t = {}", failure.time);
    assert!(failure.state[0] > 1e6);
}

// --- Observation ---

#[test]
fn observer_sees_increasing_accepted_times() {
    let mut accepted = Vec::new();
    let observer = |event: &Event<'_, 2>| -> Option<Action> {
        if let Event::Accepted { time, state, .. } = event {
            assert!(state.iter().all(|x| x.is_finite()));
            accepted.push(*time);
        }
        None
    };

    let trajectory = solve(&oscillator, [1.0, 0.0], &[0.0, 4.0], &Config::default(), observer)
        .unwrap();

    assert_eq!(accepted.len(), trajectory.stats().accepted);
    assert!(accepted.windows(2).all(|pair| pair[0] < pair[1]));
    assert_relative_eq!(accepted[accepted.len() - 1], 4.0);
}

#[test]
fn observer_can_stop_early() {
    let observer = |event: &Event<'_, 1>| match event {
        Event::Accepted { step: 3, .. } => Some(Action::StopEarly),
        _ => None,
    };

    let result = solve(&decay, [1.0], &[0.0, 10.0], &Config::default(), observer);

    let Err(Error::StoppedByObserver { time, state }) = result else {
        panic!("expected an early stop");
    };
    assert!(time > 0.0 && time < 10.0);
    assert_relative_eq!(state[0], (-time).exp(), epsilon = 1e-7);
}
