use log::Level;
use swing_core::Observer;
use swing_solvers::transient::dopri5::Event;

/// Reports every step attempt of the Dormand–Prince solver through `log`.
///
/// Accepted steps are logged at [`Level::Trace`] and rejected trials at
/// [`Level::Debug`] unless configured otherwise. The logger never acts, so it
/// works with any action type.
#[derive(Debug, Clone)]
pub struct StepLogger {
    accepted_level: Level,
    rejected_level: Level,
    accepted: usize,
    rejected: usize,
}

impl StepLogger {
    /// Creates a logger with the default levels.
    #[must_use]
    pub fn new() -> Self {
        Self::with_levels(Level::Trace, Level::Debug)
    }

    /// Creates a logger that reports accepted and rejected steps at the given levels.
    #[must_use]
    pub fn with_levels(accepted_level: Level, rejected_level: Level) -> Self {
        Self {
            accepted_level,
            rejected_level,
            accepted: 0,
            rejected: 0,
        }
    }

    /// Number of accepted steps seen so far.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Number of rejected trials seen so far.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

impl Default for StepLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, A> Observer<Event<'_, N>, A> for StepLogger {
    fn observe(&mut self, event: &Event<'_, N>) -> Option<A> {
        match *event {
            Event::Accepted {
                step,
                time,
                step_size,
                error,
                state,
            } => {
                self.accepted += 1;
                log::log!(
                    self.accepted_level,
                    "step {step}: t = {time}, h = {step_size:e}, error = {error:.3e}, x = {state:?}"
                );
            }
            Event::Rejected {
                time,
                step_size,
                error,
            } => {
                self.rejected += 1;
                log::log!(
                    self.rejected_level,
                    "rejected: t = {time}, h = {step_size:e}, error = {error:.3e}"
                );
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use swing_solvers::transient::dopri5::{self, Action, Config};

    #[test]
    fn counts_match_solver_stats() {
        let system = |x: &[f64; 2], _t: f64| [x[1], -x[0]];
        let mut logger = StepLogger::new();

        let trajectory = dopri5::solve(
            &system,
            [1.0, 0.0],
            &[0.0, 10.0],
            &Config::default(),
            |event: &Event<'_, 2>| -> Option<Action> { logger.observe(event) },
        )
        .unwrap();

        let stats = trajectory.stats();
        assert_eq!(logger.accepted(), stats.accepted);
        assert_eq!(logger.rejected(), stats.rejected);
    }

    #[test]
    fn never_acts() {
        let mut logger = StepLogger::with_levels(Level::Info, Level::Warn);
        let state = [0.5];
        let event = Event::Accepted {
            step: 1,
            time: 0.1,
            step_size: 0.1,
            error: 0.3,
            state: &state,
        };

        let action: Option<Action> = logger.observe(&event);

        assert_eq!(action, None);
        assert_eq!(logger.accepted(), 1);
        assert_eq!(logger.rejected(), 0);
    }
}
