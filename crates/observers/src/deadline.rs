use std::time::{Duration, Instant};

use swing_core::Observer;

use crate::traits::{CanStopEarly, HasTime};

/// Stops a solve once a wall-clock budget has been spent.
///
/// The clock starts at the first observed event, so a `Deadline` can be built
/// ahead of time and handed to the solver later.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use swing_observers::Deadline;
/// use swing_solvers::transient::dopri5::{self, Config};
///
/// let system = |x: &[f64; 1], _t: f64| [-x[0]];
/// let deadline = Deadline::new(Duration::from_secs(10));
///
/// let trajectory = dopri5::solve(&system, [1.0], &[0.0, 1.0], &Config::default(), deadline)
///     .expect("a decay finishes well within ten seconds");
/// assert_eq!(trajectory.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Deadline {
    budget: Duration,
    started: Option<Instant>,
}

impl Deadline {
    /// Creates a deadline that allows `budget` of wall-clock time.
    #[must_use]
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            started: None,
        }
    }

    /// The wall-clock budget.
    #[must_use]
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time spent since the first observed event, or zero if none was seen.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started.map_or(Duration::ZERO, |started| started.elapsed())
    }
}

impl<E: HasTime, A: CanStopEarly> Observer<E, A> for Deadline {
    fn observe(&mut self, event: &E) -> Option<A> {
        let started = *self.started.get_or_insert_with(Instant::now);
        if started.elapsed() < self.budget {
            return None;
        }

        log::warn!(
            "wall-clock budget of {:?} spent at t = {}",
            self.budget,
            event.time()
        );
        Some(A::stop_early())
    }
}
