//! Core traits and types for the Swing toolkit.
//!
//! This crate defines the shared abstractions that integrators, observers,
//! and models build on:
//!
//! - [`OdeSystem`] — the right-hand side `dx/dt = f(x, t)` of a state-space
//!   model, evaluated at whatever times an integrator chooses
//! - [`StateVector`] — a fixed-size state of `N` real components
//! - [`Observer`] — receives solver events and optionally returns control actions

mod observer;
mod system;

pub use observer::Observer;
pub use system::{OdeSystem, StateVector};
