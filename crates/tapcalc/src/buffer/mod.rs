//! Expression buffer state machine
//!
//! One [`Key`] at a time is folded into a [`DisplayState`]:
//!
//! - [`insert`] appends literal text for digits, operators and function labels
//! - [`balance`] counts parentheses and guards the `)` key
//! - [`format`] rewrites the buffer into evaluator syntax at `=` time
//! - [`gate`] runs the evaluator and turns its answer into display state
//! - [`machine`] ties them together in a single total transition function

pub mod balance;
pub mod format;
pub mod gate;
pub mod insert;
pub mod key;
pub mod machine;

pub use balance::{close_count, close_paren, missing_closers, open_count};
pub use format::{format_expression, rewrite, RewriteRule, REWRITE_RULES};
pub use gate::{canonical_number, evaluate_buffer, Evaluation};
pub use insert::{insert, insertion, RADICAL};
pub use key::{FunctionKey, Key, OperatorKey, UnknownKey};
pub use machine::{backspace, step, transition, DisplayState, Session, Step, ERROR_SENTINEL};
