/// Control actions supported by the Dormand–Prince solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop the solver.
    ///
    /// The solver returns [`Error::StoppedByObserver`](super::Error::StoppedByObserver)
    /// with the last accepted time and state; a partial trajectory is never
    /// returned.
    StopEarly,
}
