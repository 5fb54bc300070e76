//! Display state machine
//!
//! [`transition`] is a total function of (state, key): it never fails and
//! never panics, whatever the buffer contains. [`Session`] owns a state and
//! an evaluator for front ends that want a mutable handle.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::buffer::balance::close_paren;
use crate::buffer::gate::evaluate_buffer;
use crate::buffer::insert::insert;
use crate::buffer::key::{Key, UnknownKey};
use crate::core::evaluator::Evaluator;
use crate::core::Evaluate;

/// Text shown while in the error state
pub const ERROR_SENTINEL: &str = "Error";

/// What the display currently holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "buffer", rename_all = "snake_case")]
pub enum DisplayState {
    /// Expression under construction
    Editing(String),
    /// Canonical result of the last `=`; further keys append to it
    Result(String),
    /// Last `=` failed; the failed buffer is gone
    Error,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::Editing(String::new())
    }
}

impl DisplayState {
    /// The buffer the next key operates on
    ///
    /// Empty in the error state: after a failure, editing starts over.
    #[must_use]
    pub fn buffer(&self) -> &str {
        match self {
            Self::Editing(buffer) | Self::Result(buffer) => buffer,
            Self::Error => "",
        }
    }

    /// Text for the display panel
    #[must_use]
    pub fn display(&self) -> &str {
        match self {
            Self::Error => ERROR_SENTINEL,
            _ => self.buffer(),
        }
    }

    /// Returns true in the error state
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Returns true right after a successful `=`
    #[must_use]
    pub const fn is_result(&self) -> bool {
        matches!(self, Self::Result(_))
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// Result of applying one key
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// The new state
    pub state: DisplayState,
    /// The evaluator input, when the key was `=`
    pub formatted: Option<String>,
}

/// Removes the last character; no-op on an empty buffer
#[must_use]
pub fn backspace(buffer: &str) -> String {
    let mut next = buffer.to_string();
    next.pop();
    next
}

/// Applies a key and reports the formatted expression if one was evaluated
pub fn step<E: Evaluate + ?Sized>(state: &DisplayState, key: Key, evaluator: &mut E) -> Step {
    let buffer = state.buffer();
    let editing = |next: String| Step {
        state: DisplayState::Editing(next),
        formatted: None,
    };

    match key {
        Key::AllClear => editing(String::new()),
        Key::Clear | Key::Backspace => editing(backspace(buffer)),
        Key::CloseParen => editing(close_paren(buffer)),
        Key::Equals => {
            let evaluation = evaluate_buffer(buffer, evaluator);
            Step {
                state: evaluation.state,
                formatted: Some(evaluation.formatted),
            }
        }
        Key::Sqrt | Key::Function(_) | Key::Digit(_) | Key::Point | Key::Operator(_) => {
            editing(insert(buffer, key))
        }
    }
}

/// The state machine: (state, key) to next state
pub fn transition<E: Evaluate + ?Sized>(
    state: DisplayState,
    key: Key,
    evaluator: &mut E,
) -> DisplayState {
    step(&state, key, evaluator).state
}

/// A display state paired with the evaluator that serves its `=` key
#[derive(Debug)]
pub struct Session<E = Evaluator> {
    state: DisplayState,
    evaluator: E,
    last_formatted: Option<String>,
}

impl Default for Session<Evaluator> {
    fn default() -> Self {
        Self::new()
    }
}

impl Session<Evaluator> {
    /// Creates a session with the built-in evaluator
    #[must_use]
    pub fn new() -> Self {
        Self::with_evaluator(Evaluator::new())
    }
}

impl<E: Evaluate> Session<E> {
    /// Creates a session around any evaluator
    #[must_use]
    pub fn with_evaluator(evaluator: E) -> Self {
        Self {
            state: DisplayState::default(),
            evaluator,
            last_formatted: None,
        }
    }

    /// Applies one key
    pub fn press(&mut self, key: Key) -> &DisplayState {
        let Step { state, formatted } = step(&self.state, key, &mut self.evaluator);
        debug!(key = %key, before = %self.state, after = %state, "key applied");
        if formatted.is_some() {
            self.last_formatted = formatted;
        }
        self.state = state;
        &self.state
    }

    /// Parses a label and applies it
    pub fn press_label(&mut self, label: &str) -> Result<&DisplayState, UnknownKey> {
        let key: Key = label.parse()?;
        Ok(self.press(key))
    }

    /// Applies a sequence of labels, stopping at the first unknown one
    pub fn press_all<I, S>(&mut self, labels: I) -> Result<&DisplayState, UnknownKey>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for label in labels {
            self.press_label(label.as_ref())?;
        }
        Ok(&self.state)
    }

    /// Current display state
    #[must_use]
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Buffer the next key will operate on
    #[must_use]
    pub fn buffer(&self) -> &str {
        self.state.buffer()
    }

    /// Display panel text
    #[must_use]
    pub fn display(&self) -> &str {
        self.state.display()
    }

    /// What the evaluator received on the most recent `=`
    #[must_use]
    pub fn last_formatted(&self) -> Option<&str> {
        self.last_formatted.as_deref()
    }

    /// Returns to the initial state
    pub fn reset(&mut self) {
        self.state = DisplayState::default();
        self.last_formatted = None;
    }

    /// The evaluator backing this session
    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }
}
