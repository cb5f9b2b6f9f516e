use swing_core::StateVector;

/// Events emitted by the Dormand–Prince solver.
///
/// One event is emitted per step attempt. Accepted steps carry the new state;
/// rejected steps only report the trial that failed the error test.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a, const N: usize> {
    /// A step met the error tolerance and the solution advanced.
    Accepted {
        /// Accepted step count, starting at 1.
        step: usize,

        /// Time reached by the step.
        time: f64,

        /// Size of the step just taken.
        step_size: f64,

        /// Normalized error estimate of the step (at most 1).
        error: f64,

        /// State at `time`.
        state: &'a StateVector<N>,
    },

    /// A trial step failed the error test and will be retried with a smaller step.
    Rejected {
        /// Time the rejected step started from.
        time: f64,

        /// Size of the rejected trial step.
        step_size: f64,

        /// Normalized error estimate, greater than 1 or not finite.
        error: f64,
    },
}

impl<const N: usize> Event<'_, N> {
    /// Returns the time the solution has reached.
    ///
    /// For a rejected step this is the start of the failed trial.
    #[must_use]
    pub fn time(&self) -> f64 {
        match self {
            Self::Accepted { time, .. } | Self::Rejected { time, .. } => *time,
        }
    }

    /// Returns the size of the attempted step.
    #[must_use]
    pub fn step_size(&self) -> f64 {
        match self {
            Self::Accepted { step_size, .. } | Self::Rejected { step_size, .. } => *step_size,
        }
    }

    /// Returns the normalized error estimate of the attempted step.
    #[must_use]
    pub fn error(&self) -> f64 {
        match self {
            Self::Accepted { error, .. } | Self::Rejected { error, .. } => *error,
        }
    }
}
