use thiserror::Error;

/// Configuration for the Dormand–Prince solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    rel_tol: f64,
    abs_tol: f64,
    max_steps: usize,
    max_rejections: usize,
    max_step: Option<f64>,
    first_step: Option<f64>,
}

/// Errors that can occur when validating a Dormand–Prince solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("rel_tol must be finite and non-negative")]
    RelTol,

    #[error("abs_tol must be finite and positive")]
    AbsTol,

    #[error("max_step must be finite and positive")]
    MaxStep,

    #[error("first_step must be finite and positive")]
    FirstStep,
}

impl Default for Config {
    fn default() -> Self {
        // Known-good values, unwrap is safe
        Self::new(1.49012e-8, 1.49012e-8).unwrap()
    }
}

impl Config {
    /// Creates a new config with validated local error tolerances.
    ///
    /// A step is accepted when its estimated error in every component stays
    /// within `abs_tol + rel_tol * |x|`, measured as a root-mean-square norm.
    /// Budgets default to 100 000 step attempts and 64 consecutive step-size
    /// reductions; there is no step-size ceiling beyond the integration span
    /// and the initial step is estimated automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if `rel_tol` is negative or non-finite, or if `abs_tol`
    /// is not finite and positive.
    pub fn new(rel_tol: f64, abs_tol: f64) -> Result<Self, ConfigError> {
        if !rel_tol.is_finite() || rel_tol < 0.0 {
            return Err(ConfigError::RelTol);
        }
        if !abs_tol.is_finite() || abs_tol <= 0.0 {
            return Err(ConfigError::AbsTol);
        }

        Ok(Self {
            rel_tol,
            abs_tol,
            max_steps: 100_000,
            max_rejections: 64,
            max_step: None,
            first_step: None,
        })
    }

    /// Sets the maximum number of step attempts (accepted and rejected).
    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Sets how many consecutive step-size reductions are allowed before the
    /// solver gives up on the current step.
    #[must_use]
    pub fn with_max_rejections(mut self, max_rejections: usize) -> Self {
        self.max_rejections = max_rejections;
        self
    }

    /// Limits the size of any single step.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_step` is not finite and positive.
    pub fn with_max_step(mut self, max_step: f64) -> Result<Self, ConfigError> {
        if !max_step.is_finite() || max_step <= 0.0 {
            return Err(ConfigError::MaxStep);
        }
        self.max_step = Some(max_step);
        Ok(self)
    }

    /// Uses `first_step` as the initial step instead of estimating one.
    ///
    /// # Errors
    ///
    /// Returns an error if `first_step` is not finite and positive.
    pub fn with_first_step(mut self, first_step: f64) -> Result<Self, ConfigError> {
        if !first_step.is_finite() || first_step <= 0.0 {
            return Err(ConfigError::FirstStep);
        }
        self.first_step = Some(first_step);
        Ok(self)
    }

    /// Returns the relative error tolerance.
    #[must_use]
    pub fn rel_tol(&self) -> f64 {
        self.rel_tol
    }

    /// Returns the absolute error tolerance.
    #[must_use]
    pub fn abs_tol(&self) -> f64 {
        self.abs_tol
    }

    /// Returns the maximum number of step attempts.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Returns the maximum number of consecutive step-size reductions.
    #[must_use]
    pub fn max_rejections(&self) -> usize {
        self.max_rejections
    }

    /// Returns the step-size ceiling, if one was set.
    #[must_use]
    pub fn max_step(&self) -> Option<f64> {
        self.max_step
    }

    /// Returns the initial step, if one was set.
    #[must_use]
    pub fn first_step(&self) -> Option<f64> {
        self.first_step
    }
}
