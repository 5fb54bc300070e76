//! Arithmetic operations and scientific functions
//!
//! Every result passes through overflow checking and the calculator's
//! [`AnomalyValidator`] before it is handed back to the evaluator.

use crate::core::{AnomalyValidator, CalcError, CalcResult};

/// Binary operations understood by the evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Power (** or ^)
    Power,
}

impl Operation {
    /// Returns the operator symbol in evaluator syntax
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "**",
        }
    }

    /// Returns the precedence level (higher = evaluated first)
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
            Self::Power => 3,
        }
    }

    /// Returns true if this operation is left-associative
    #[must_use]
    pub const fn is_left_associative(&self) -> bool {
        !matches!(self, Self::Power)
    }
}

/// Single-argument functions callable as `name(...)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// Square root
    Sqrt,
    /// Sine (radians)
    Sin,
    /// Cosine (radians)
    Cos,
    /// Tangent (radians)
    Tan,
    /// Natural logarithm
    Ln,
    /// Base-10 logarithm
    ///
    /// Not the natural log some expression libraries give `log`: the keypad
    /// carries both labels, so `ln` is natural and `log` is common.
    Log,
}

impl Function {
    /// All functions, in keypad order
    pub const ALL: [Self; 6] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Ln,
        Self::Log,
        Self::Sqrt,
    ];

    /// Name used in evaluator syntax
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ln => "ln",
            Self::Log => "log",
        }
    }

    /// Looks a function up by its evaluator name (case-insensitive)
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    /// Applies the function, rejecting arguments outside its domain
    pub fn apply(&self, x: f64) -> CalcResult<f64> {
        match self {
            Self::Sqrt if x < 0.0 => Err(CalcError::Domain(format!("sqrt({x})"))),
            Self::Ln | Self::Log if x <= 0.0 => {
                Err(CalcError::Domain(format!("{}({x})", self.name())))
            }
            Self::Sqrt => Ok(x.sqrt()),
            Self::Sin => Ok(x.sin()),
            Self::Cos => Ok(x.cos()),
            Self::Tan => Ok(x.tan()),
            Self::Ln => Ok(x.ln()),
            Self::Log => Ok(x.log10()),
        }
    }
}

/// Core calculator implementing all arithmetic operations
#[derive(Debug, Default)]
pub struct Calculator {
    pub(crate) validator: AnomalyValidator,
}

impl Calculator {
    /// Creates a new calculator with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            validator: AnomalyValidator::new(),
        }
    }

    /// Creates a calculator with a custom validator
    #[must_use]
    pub fn with_validator(validator: AnomalyValidator) -> Self {
        Self { validator }
    }

    /// Performs an operation on two operands
    pub fn calculate(&self, a: f64, b: f64, op: Operation) -> CalcResult<f64> {
        let raw_result = match op {
            Operation::Add => Self::add(a, b)?,
            Operation::Subtract => Self::subtract(a, b)?,
            Operation::Multiply => Self::multiply(a, b)?,
            Operation::Divide => Self::divide(a, b)?,
            Operation::Power => Self::power(a, b)?,
        };

        self.validate(raw_result)
    }

    /// Applies a function to its argument
    pub fn call(&self, function: Function, x: f64) -> CalcResult<f64> {
        let raw_result = function.apply(x)?;
        let checked = Self::check_overflow(raw_result)?;
        self.validate(checked)
    }

    /// Runs a value through the anomaly validator
    pub fn validate(&self, value: f64) -> CalcResult<f64> {
        self.validator.validate(value).map_err(CalcError::Anomaly)
    }

    /// Addition: a + b
    pub fn add(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a + b)
    }

    /// Subtraction: a - b
    pub fn subtract(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a - b)
    }

    /// Multiplication: a * b
    pub fn multiply(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a * b)
    }

    /// Division: a / b
    pub fn divide(a: f64, b: f64) -> CalcResult<f64> {
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Self::check_overflow(a / b)
    }

    /// Power: a ** b
    pub fn power(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a.powf(b))
    }

    fn check_overflow(result: f64) -> CalcResult<f64> {
        if result.is_nan() {
            Err(CalcError::InvalidResult("NaN".into()))
        } else if result.is_infinite() {
            Err(CalcError::Overflow)
        } else {
            Ok(result)
        }
    }
}
