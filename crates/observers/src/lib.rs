//! Reusable observers for the Swing integrators.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work with any solver whose events and actions implement them.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasTime`], [`HasStepSize`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`Deadline`] — stops a solve once a wall-clock budget is spent
//! - [`StallGuard`] — stops a solve once the stepper's steps collapse
//! - [`StepLogger`] — reports each step attempt through the `log` facade
//!
//! [`Observer`]: swing_core::Observer
//! [`HasTime`]: traits::HasTime
//! [`HasStepSize`]: traits::HasStepSize
//! [`CanStopEarly`]: traits::CanStopEarly

pub mod traits;

mod deadline;
mod logger;
mod stall;

pub use deadline::Deadline;
pub use logger::StepLogger;
pub use stall::StallGuard;
