//! Expression evaluator backing the `=` key
//!
//! The state machine only sees this module through the [`Evaluate`] trait:
//! a formatted expression goes in, a number or a [`CalcError`] comes out.

pub mod evaluator;
mod operations;
pub mod parser;

pub use operations::{Calculator, Function, Operation};

use thiserror::Error;

/// Result type for evaluator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Evaluation failures - every one of them ends up as the `Error` display
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// Division by zero attempted
    #[error("Division by zero")]
    DivisionByZero,
    /// Result overflowed (infinity)
    #[error("Overflow: result exceeds maximum value")]
    Overflow,
    /// Invalid expression syntax
    #[error("Invalid expression: {0}")]
    ParseError(String),
    /// Function name the evaluator does not know
    #[error("Undefined function: {0}")]
    UnknownFunction(String),
    /// Argument outside a function's domain
    #[error("Domain error: {0}")]
    Domain(String),
    /// Empty expression provided
    #[error("Empty expression")]
    EmptyExpression,
    /// Invalid result (NaN or other)
    #[error("Invalid result: {0}")]
    InvalidResult(String),
    /// Result rejected by the [`AnomalyValidator`]
    #[error("Anomaly violation: {0}")]
    Anomaly(AnomalyViolation),
}

/// The evaluator capability consumed by the display state machine
pub trait Evaluate {
    /// Evaluates a formatted expression to a number
    fn evaluate(&mut self, expression: &str) -> CalcResult<f64>;
}

/// Anomalies detected in an intermediate or final result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnomalyViolation {
    /// NaN detected in result
    #[error("NaN detected")]
    NaN,
    /// Infinity detected in result
    #[error("Infinite value detected")]
    Infinite,
    /// Result exceeds maximum magnitude
    #[error("Overflow: {0} exceeds maximum magnitude")]
    Overflow(f64),
}

/// Result validator applied after every arithmetic step
///
/// Keeps NaN and infinities from ever reaching the display; they surface as
/// [`CalcError::Anomaly`] instead. A magnitude cap is opt-in through
/// [`AnomalyValidator::with_max_magnitude`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnomalyValidator {
    /// Maximum allowed result magnitude
    pub max_magnitude: f64,
    /// Detect NaN/Infinity
    pub check_special_values: bool,
}

impl Default for AnomalyValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnomalyValidator {
    /// Default maximum magnitude: every finite `f64` passes
    pub const DEFAULT_MAX_MAGNITUDE: f64 = f64::MAX;

    /// Creates a new validator with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_magnitude(Self::DEFAULT_MAX_MAGNITUDE)
    }

    /// Creates a validator with custom maximum magnitude
    #[must_use]
    pub fn with_max_magnitude(max_magnitude: f64) -> Self {
        Self {
            max_magnitude,
            check_special_values: true,
        }
    }

    /// Validates a calculation result
    pub fn validate(&self, result: f64) -> Result<f64, AnomalyViolation> {
        if self.check_special_values && result.is_nan() {
            return Err(AnomalyViolation::NaN);
        }

        if self.check_special_values && result.is_infinite() {
            return Err(AnomalyViolation::Infinite);
        }

        if result.abs() > self.max_magnitude {
            return Err(AnomalyViolation::Overflow(result));
        }

        Ok(result)
    }
}
