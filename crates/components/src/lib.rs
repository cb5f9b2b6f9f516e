//! Forcing signals and dynamical models for the Swing toolkit.
//!
//! - [`signal`] — tabulated input signals with clamped linear interpolation,
//!   and the [`Signal`](signal::Signal) trait models use to read a forcing
//!   input at arbitrary times
//! - [`pendulum`] — a pendulum driven by an external, time-varying force

pub mod pendulum;
pub mod signal;
