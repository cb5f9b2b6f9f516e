use swing_core::Observer;

use crate::traits::{CanStopEarly, HasStepSize, HasTime};

/// Stops a solve when the stepper keeps attempting tiny steps.
///
/// Collapsing step sizes usually mean the solution is approaching a
/// singularity or the system has become too stiff for an explicit method.
/// The solver would eventually fail on its own once the step size underflows;
/// this observer gives up earlier, after `patience` consecutive attempts below
/// `min_step`.
#[derive(Debug, Clone)]
pub struct StallGuard {
    min_step: f64,
    patience: usize,
    consecutive: usize,
}

impl StallGuard {
    /// Creates a guard that stops at the first attempt below `min_step`.
    #[must_use]
    pub fn new(min_step: f64) -> Self {
        Self {
            min_step,
            patience: 1,
            consecutive: 0,
        }
    }

    /// Tolerates up to `patience - 1` consecutive small attempts before stopping.
    #[must_use]
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience.max(1);
        self
    }
}

impl<E, A> Observer<E, A> for StallGuard
where
    E: HasStepSize + HasTime,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if event.step_size() >= self.min_step {
            self.consecutive = 0;
            return None;
        }

        self.consecutive += 1;
        if self.consecutive < self.patience {
            return None;
        }

        log::warn!(
            "step size {:e} below {:e} for {} attempts at t = {}",
            event.step_size(),
            self.min_step,
            self.consecutive,
            event.time()
        );
        Some(A::stop_early())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use swing_solvers::transient::dopri5::{self, Action, Config, Error, Event};

    fn rejected(step_size: f64) -> Event<'static, 1> {
        Event::Rejected {
            time: 1.0,
            step_size,
            error: 5.0,
        }
    }

    #[test]
    fn patience_counts_consecutive_small_steps() {
        let mut guard = StallGuard::new(1e-3).with_patience(2);

        let mut observe = |step_size| -> Option<Action> { guard.observe(&rejected(step_size)) };

        assert_eq!(observe(1e-4), None);
        assert_eq!(observe(1e-2), None);
        assert_eq!(observe(1e-4), None);
        assert_eq!(observe(1e-5), Some(Action::StopEarly));
    }

    #[test]
    fn stops_a_solve_heading_for_a_singularity() {
        // dx/dt = x² with x(0) = 1 blows up at t = 1.
        let system = |x: &[f64; 1], _t: f64| [x[0] * x[0]];
        let guard = StallGuard::new(1e-6);

        let result = dopri5::solve(&system, [1.0], &[0.0, 2.0], &Config::default(), guard);

        let Err(Error::StoppedByObserver { time, .. }) = result else {
            panic!("expected the guard to stop the solve");
        };
        assert!((time - 1.0).abs() < 1e-2, "t = {time}");
    }

    #[test]
    fn smooth_solves_are_untouched() {
        let system = |x: &[f64; 2], _t: f64| [x[1], -x[0]];
        let guard = StallGuard::new(1e-6);

        let trajectory =
            dopri5::solve(&system, [1.0, 0.0], &[0.0, 5.0], &Config::default(), guard).unwrap();

        assert_eq!(trajectory.len(), 2);
    }
}
