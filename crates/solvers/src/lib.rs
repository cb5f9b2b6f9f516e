//! Numerical integrators for the Swing toolkit.
//!
//! - [`transient`] — time integration of [`OdeSystem`] models, reporting the
//!   state at caller-chosen output times
//!
//! [`OdeSystem`]: swing_core::OdeSystem

pub mod transient;
