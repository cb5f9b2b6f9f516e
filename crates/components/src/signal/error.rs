use thiserror::Error;

/// Errors that can occur when building a [`SignalTable`](super::SignalTable).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TableError {
    #[error("times and values differ in length ({times} times, {values} values)")]
    LengthMismatch { times: usize, values: usize },

    #[error("a signal table needs at least 2 samples (got {0})")]
    TooFewSamples(usize),

    #[error("sample {index} is not finite")]
    NonFinite { index: usize },

    #[error("times must be strictly increasing (violated at index {index})")]
    NotIncreasing { index: usize },
}
