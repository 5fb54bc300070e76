//! tapcalc - keypad calculator with a scientific expression buffer
//!
//! Every keypress is a transition on a [`DisplayState`]. Keys append text
//! to an expression buffer; `=` rewrites the buffer into evaluator syntax,
//! closes any parentheses left open and evaluates it. Evaluation failures
//! never escape: they become the `Error` display state.
//!
//! # Example
//!
//! ```rust
//! use tapcalc::prelude::*;
//!
//! let mut session = Session::new();
//! session.press_all(["sin", "4", "+", "2"]).unwrap();
//! assert_eq!(session.buffer(), "sin(4+2");
//!
//! session.press(Key::Equals);
//! assert_eq!(session.last_formatted(), Some("sin(4+2)"));
//!
//! session.press_all(["AC", "5", "^", "2", "="]).unwrap();
//! assert_eq!(session.display(), "25");
//! ```
//!
//! [`DisplayState`]: buffer::DisplayState

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod buffer;
pub mod cli;
pub mod clock;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::buffer::{
        format_expression, transition, DisplayState, FunctionKey, Key, OperatorKey, Session,
        UnknownKey,
    };
    pub use crate::clock::Clock;
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::{
        AnomalyValidator, AnomalyViolation, CalcError, CalcResult, Calculator, Evaluate, Function,
        Operation,
    };
    pub use crate::driver::CalculatorDriver;

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}
