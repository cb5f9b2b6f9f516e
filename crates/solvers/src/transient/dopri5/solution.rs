use swing_core::StateVector;

/// Work done by the solver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Number of right-hand-side evaluations.
    pub evaluations: usize,

    /// Number of accepted steps.
    pub accepted: usize,

    /// Number of rejected trial steps.
    pub rejected: usize,
}

/// The state of a system sampled at the requested output times.
///
/// There is exactly one state per output time, and the first state is the
/// initial state unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<const N: usize> {
    times: Vec<f64>,
    states: Vec<StateVector<N>>,
    stats: Stats,
}

impl<const N: usize> Trajectory<N> {
    pub(super) fn new(times: Vec<f64>, states: Vec<StateVector<N>>, stats: Stats) -> Self {
        debug_assert_eq!(times.len(), states.len());
        Self {
            times,
            states,
            stats,
        }
    }

    /// The output times, as requested.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// The state at each output time.
    #[must_use]
    pub fn states(&self) -> &[StateVector<N>] {
        &self.states
    }

    /// Solver statistics for the run that produced this trajectory.
    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// The number of output times (always at least 2).
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// The state at the last output time.
    #[must_use]
    pub fn final_state(&self) -> &StateVector<N> {
        &self.states[self.states.len() - 1]
    }

    /// Collects one state component across all output times.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[must_use]
    pub fn component(&self, index: usize) -> Vec<f64> {
        assert!(index < N, "component {index} out of range for a {N}-state system");
        self.states.iter().map(|state| state[index]).collect()
    }

    /// Iterates over `(time, state)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &StateVector<N>)> {
        self.times.iter().copied().zip(&self.states)
    }

    /// Consumes the trajectory, returning its output times, states, and stats.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<StateVector<N>>, Stats) {
        (self.times, self.states, self.stats)
    }
}
