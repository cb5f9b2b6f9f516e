//! Solvers for transient problems — advancing a state through time.
//!
//! An [`OdeSystem`] provides the right-hand side `dx/dt = f(x, t)`. Solvers in
//! this module integrate it from an initial state and report a trajectory at
//! the output times the caller asks for.
//!
//! # Solvers
//!
//! - [`dopri5`] — adaptive Dormand–Prince 5(4) with dense output
//!
//! [`OdeSystem`]: swing_core::OdeSystem

pub mod dopri5;
