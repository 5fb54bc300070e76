//! The closed set of input keys
//!
//! Every keypad label maps to exactly one [`Key`]; anything else is rejected
//! at the boundary with [`UnknownKey`] before it can reach the buffer.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A label that is not part of the keypad vocabulary
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown key label: '{0}'")]
pub struct UnknownKey(pub String);

/// Scientific function keys that append `name(`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKey {
    /// `sin`
    Sin,
    /// `cos`
    Cos,
    /// `tan`
    Tan,
    /// `ln`
    Ln,
    /// `log`
    Log,
}

impl FunctionKey {
    /// All function keys, in keypad order
    pub const ALL: [Self; 5] = [Self::Sin, Self::Cos, Self::Tan, Self::Ln, Self::Log];

    /// Function name as written into the buffer
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Ln => "ln",
            Self::Log => "log",
        }
    }
}

/// Binary operator keys, appended verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKey {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Times,
    /// `/`
    Divide,
    /// `^`, rewritten to the evaluator's power syntax at `=` time
    Power,
}

impl OperatorKey {
    /// All operator keys
    pub const ALL: [Self; 5] = [
        Self::Plus,
        Self::Minus,
        Self::Times,
        Self::Divide,
        Self::Power,
    ];

    /// The operator character
    #[must_use]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Times => '*',
            Self::Divide => '/',
            Self::Power => '^',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

/// One discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// `AC`: reset the buffer
    AllClear,
    /// `C`: drop the last character
    Clear,
    /// `⌫`: drop the last character
    Backspace,
    /// `=`: format and evaluate
    Equals,
    /// `√`: radical symbol followed by `(`
    Sqrt,
    /// Scientific function label
    Function(FunctionKey),
    /// `)`: appended only when it closes an open parenthesis
    CloseParen,
    /// `0`-`9`
    Digit(u8),
    /// `.`
    Point,
    /// `+ - * / ^`
    Operator(OperatorKey),
}

impl Key {
    /// Every key in the vocabulary
    pub const ALL: [Self; 27] = [
        Self::AllClear,
        Self::Clear,
        Self::Equals,
        Self::Backspace,
        Self::Sqrt,
        Self::Function(FunctionKey::Sin),
        Self::Function(FunctionKey::Cos),
        Self::Function(FunctionKey::Tan),
        Self::Function(FunctionKey::Ln),
        Self::Function(FunctionKey::Log),
        Self::CloseParen,
        Self::Digit(0),
        Self::Digit(1),
        Self::Digit(2),
        Self::Digit(3),
        Self::Digit(4),
        Self::Digit(5),
        Self::Digit(6),
        Self::Digit(7),
        Self::Digit(8),
        Self::Digit(9),
        Self::Point,
        Self::Operator(OperatorKey::Plus),
        Self::Operator(OperatorKey::Minus),
        Self::Operator(OperatorKey::Times),
        Self::Operator(OperatorKey::Divide),
        Self::Operator(OperatorKey::Power),
    ];

    /// Creates a digit key, if `d` is a single decimal digit
    #[must_use]
    pub const fn digit(d: u8) -> Option<Self> {
        if d <= 9 {
            Some(Self::Digit(d))
        } else {
            None
        }
    }

    /// Parses a keypad label
    ///
    /// Function labels match case-insensitively so `Cos` and `cos` are the
    /// same key.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let key = match label {
            "AC" => Self::AllClear,
            "C" => Self::Clear,
            "=" => Self::Equals,
            "⌫" => Self::Backspace,
            "√" => Self::Sqrt,
            ")" => Self::CloseParen,
            "." => Self::Point,
            _ => {
                let mut chars = label.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    if let Some(d) = ch.to_digit(10) {
                        return Self::digit(d as u8);
                    }
                    return OperatorKey::from_symbol(ch).map(Self::Operator);
                }
                return FunctionKey::ALL
                    .into_iter()
                    .find(|f| f.name().eq_ignore_ascii_case(label))
                    .map(Self::Function);
            }
        };
        Some(key)
    }

    /// The label printed on the keypad button
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::AllClear => "AC".to_string(),
            Self::Clear => "C".to_string(),
            Self::Equals => "=".to_string(),
            Self::Backspace => "⌫".to_string(),
            Self::Sqrt => "√".to_string(),
            Self::Function(f) => f.name().to_string(),
            Self::CloseParen => ")".to_string(),
            Self::Digit(d) => d.to_string(),
            Self::Point => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
        }
    }

    /// Literal text this key appends, if any
    #[must_use]
    pub fn insertion(&self) -> Option<String> {
        crate::buffer::insert::insertion(*self)
    }

    /// Returns true for keys that only edit or evaluate the buffer
    #[must_use]
    pub const fn is_command(&self) -> bool {
        matches!(
            self,
            Self::AllClear | Self::Clear | Self::Backspace | Self::Equals
        )
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for Key {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownKey(s.to_string()))
    }
}
