/// Receives solver events and optionally returns a control action.
///
/// Solvers call [`Observer::observe`] as they make progress. Returning `None`
/// lets the solver continue unchanged; returning `Some(action)` asks it to
/// react, where the available actions are defined by each solver.
///
/// Closures of the form `FnMut(&E) -> Option<A>` are observers, and `()` is a
/// no-op observer for callers that do not need instrumentation.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
