//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different solvers.
//!
//! # Event traits
//!
//! - [`HasTime`] — events that report how far the solution has progressed
//! - [`HasStepSize`] — events that report the size of a step attempt
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use swing_core::Observer;
//! use swing_observers::traits::{CanStopEarly, HasTime};
//!
//! /// Stops once the solution passes a time of interest.
//! struct StopAfter {
//!     time: f64,
//! }
//!
//! impl<E: HasTime, A: CanStopEarly> Observer<E, A> for StopAfter {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.time() > self.time).then(A::stop_early)
//!     }
//! }
//! ```

use swing_solvers::transient::dopri5;

/// An event that reports the time the solution has reached.
pub trait HasTime {
    /// Returns the simulated time associated with this event.
    fn time(&self) -> f64;
}

/// An event that reports the size of a step attempt.
pub trait HasStepSize {
    /// Returns the step size that was attempted.
    fn step_size(&self) -> f64;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

// --- Event traits for dopri5::Event ---

impl<const N: usize> HasTime for dopri5::Event<'_, N> {
    fn time(&self) -> f64 {
        dopri5::Event::time(self)
    }
}

impl<const N: usize> HasStepSize for dopri5::Event<'_, N> {
    fn step_size(&self) -> f64 {
        dopri5::Event::step_size(self)
    }
}

// --- CanStopEarly impls ---

impl CanStopEarly for dopri5::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
