//! Tabulated input signals.
//!
//! A forcing input that is only known at discrete sample times must still be
//! readable at any time an integrator asks for, because adaptive steppers
//! evaluate the right-hand side between (and slightly beyond) the caller's
//! output times. [`SignalTable`] provides that: clamped piecewise-linear
//! interpolation over an immutable table of samples.
//!
//! Models read their input through the [`Signal`] trait, so a known closed-form
//! input can be used instead of a table by wrapping it in [`Analytic`].

mod error;

pub use error::TableError;

/// A time-varying scalar input that can be read at any time.
pub trait Signal {
    /// Returns the signal value at `time`.
    fn value_at(&self, time: f64) -> f64;
}

impl<S: Signal + ?Sized> Signal for &S {
    fn value_at(&self, time: f64) -> f64 {
        (**self).value_at(time)
    }
}

/// A signal given by a closed-form function of time.
///
/// # Example
///
/// ```
/// use swing_components::signal::{Analytic, Signal};
///
/// let forcing = Analytic(|t: f64| t.sin() + (2.0 * t).cos());
/// assert_eq!(forcing.value_at(0.0), 1.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Analytic<F>(pub F);

impl<F: Fn(f64) -> f64> Signal for Analytic<F> {
    fn value_at(&self, time: f64) -> f64 {
        (self.0)(time)
    }
}

/// An immutable, ordered table of `(time, value)` samples.
///
/// Lookups interpolate linearly between the two samples that bracket the query
/// time and clamp to the boundary samples outside `[times[0], times[n - 1]]`.
/// The table is never modified after construction, so it can be shared by
/// reference across any number of evaluations (or threads).
///
/// # Example
///
/// ```
/// use swing_components::signal::SignalTable;
///
/// let table = SignalTable::new(vec![0.0, 1.0, 2.0], vec![0.0, 2.0, 1.0]).unwrap();
///
/// assert_eq!(table.lookup(0.5), 1.0);
/// assert_eq!(table.lookup(-3.0), 0.0); // clamped, not extrapolated
/// assert_eq!(table.lookup(9.0), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTable {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl SignalTable {
    /// Creates a table from sample times and the signal values at those times.
    ///
    /// # Errors
    ///
    /// Returns an error if the lengths differ, fewer than two samples are
    /// given, any sample is not finite, or `times` is not strictly increasing.
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self, TableError> {
        if times.len() != values.len() {
            return Err(TableError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if times.len() < 2 {
            return Err(TableError::TooFewSamples(times.len()));
        }
        if let Some(index) = times
            .iter()
            .zip(&values)
            .position(|(t, v)| !t.is_finite() || !v.is_finite())
        {
            return Err(TableError::NonFinite { index });
        }
        if let Some(index) = times.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(TableError::NotIncreasing { index: index + 1 });
        }

        Ok(Self { times, values })
    }

    /// Creates a table by sampling `signal` at each of `times`.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`SignalTable::new`].
    pub fn sample(times: Vec<f64>, signal: impl Fn(f64) -> f64) -> Result<Self, TableError> {
        let values = times.iter().map(|&t| signal(t)).collect();
        Self::new(times, values)
    }

    /// Returns the signal value at `time`.
    ///
    /// Finds the bracketing interval by binary search and interpolates
    /// linearly. Queries at or before the first sample return the first value,
    /// and queries at or after the last sample return the last value. A NaN
    /// query yields NaN.
    #[must_use]
    pub fn lookup(&self, time: f64) -> f64 {
        let last = self.times.len() - 1;
        if time <= self.times[0] {
            return self.values[0];
        }
        if time >= self.times[last] {
            return self.values[last];
        }

        // First index with times[i] > time, minus one, is the left bracket.
        let i = self
            .times
            .partition_point(|&t| t <= time)
            .saturating_sub(1)
            .min(last - 1);

        let (t0, t1) = (self.times[i], self.times[i + 1]);
        let (v0, v1) = (self.values[i], self.values[i + 1]);
        v0 + (v1 - v0) * (time - t0) / (t1 - t0)
    }

    /// The sample times, strictly increasing.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// The sample values, aligned with [`SignalTable::times`].
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The number of samples (always at least 2).
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// The first and last sample times.
    #[must_use]
    pub fn span(&self) -> (f64, f64) {
        (self.times[0], self.times[self.times.len() - 1])
    }
}

impl Signal for SignalTable {
    fn value_at(&self, time: f64) -> f64 {
        self.lookup(time)
    }
}
