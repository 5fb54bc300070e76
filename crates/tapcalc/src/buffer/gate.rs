//! The `=` key: format, evaluate, commit
//!
//! Evaluation failures stop here. Whatever the evaluator reports, the caller
//! only ever sees a [`DisplayState`].

use tracing::debug;

use crate::buffer::format::format_expression;
use crate::buffer::machine::DisplayState;
use crate::core::Evaluate;

/// Outcome of pressing `=`
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// The string handed to the evaluator
    pub formatted: String,
    /// `Result` with the canonical number, or `Error`
    pub state: DisplayState,
}

/// Formats the buffer, evaluates it and converts the answer to display state
pub fn evaluate_buffer<E: Evaluate + ?Sized>(buffer: &str, evaluator: &mut E) -> Evaluation {
    let formatted = format_expression(buffer);
    debug!(%buffer, %formatted, "evaluating");

    let state = match evaluator.evaluate(&formatted) {
        Ok(value) => DisplayState::Result(canonical_number(value)),
        Err(error) => {
            debug!(%formatted, %error, "evaluation failed");
            DisplayState::Error
        }
    };

    Evaluation { formatted, state }
}

/// Canonical text form of a result
///
/// Shortest round-trip digits; exponent notation below `1e-6` and from
/// `1e21` upward. Negative zero prints as `0`. The output is itself valid
/// evaluator input so results can be chained.
#[must_use]
pub fn canonical_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        format!("{value}")
    } else {
        format!("{value:e}")
    }
}
