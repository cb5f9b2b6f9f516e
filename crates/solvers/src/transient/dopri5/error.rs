use std::error::Error as StdError;

use thiserror::Error;

use super::input::InputError;

/// Errors that can occur during Dormand–Prince integration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error(transparent)]
    Integration(#[from] IntegrationFailure),

    #[error("system evaluation failed at t = {time}")]
    System {
        time: f64,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("stopped by observer at t = {time}")]
    StoppedByObserver { time: f64, state: Vec<f64> },
}

impl Error {
    pub(crate) fn system<E: StdError + Send + Sync + 'static>(time: f64, err: E) -> Self {
        Self::System {
            time,
            source: Box::new(err),
        }
    }
}

/// The adaptive stepper could not make progress.
///
/// Carries the last time and state the solver successfully reached, which is
/// usually close to where the solution becomes stiff or singular.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("integration failed at t = {time} after {steps} accepted steps: {reason}")]
pub struct IntegrationFailure {
    /// Why the stepper gave up.
    pub reason: FailureReason,

    /// Last time reached by an accepted step.
    pub time: f64,

    /// State at `time`.
    pub state: Vec<f64>,

    /// Number of accepted steps before the failure.
    pub steps: usize,
}

/// The budget or limit that stopped the stepper.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum FailureReason {
    #[error("step size {step_size:e} underflowed")]
    StepSizeTooSmall { step_size: f64 },

    #[error("more than {limit} consecutive step-size reductions")]
    TooManyRejections { limit: usize },

    #[error("exceeded the budget of {limit} step attempts")]
    MaxStepsExceeded { limit: usize },
}
