//! Key to buffer text

use crate::buffer::key::Key;

/// The radical symbol kept in the buffer until `=` rewrites it to `sqrt(`
pub const RADICAL: char = '√';

/// Literal text a key appends to the buffer
///
/// Returns `None` for keys that edit or evaluate instead of inserting, and
/// for `)` whose append is conditional (see [`close_paren`]).
///
/// [`close_paren`]: crate::buffer::balance::close_paren
#[must_use]
pub fn insertion(key: Key) -> Option<String> {
    match key {
        Key::Digit(d) => Some(d.to_string()),
        Key::Point => Some(".".to_string()),
        Key::Operator(op) => Some(op.symbol().to_string()),
        Key::Function(f) => Some(format!("{}(", f.name())),
        Key::Sqrt => Some(format!("{RADICAL}(")),
        Key::AllClear | Key::Clear | Key::Backspace | Key::Equals | Key::CloseParen => None,
    }
}

/// Returns the buffer with the key's insertion appended
#[must_use]
pub fn insert(buffer: &str, key: Key) -> String {
    let mut next = buffer.to_string();
    if let Some(text) = insertion(key) {
        next.push_str(&text);
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::key::{FunctionKey, OperatorKey};

    #[test]
    fn test_digits_and_point_verbatim() {
        assert_eq!(insert("", Key::Digit(0)), "0");
        assert_eq!(insert("12", Key::Point), "12.");
        assert_eq!(insert("1.", Key::Digit(5)), "1.5");
    }

    #[test]
    fn test_operators_verbatim() {
        assert_eq!(insert("2", Key::Operator(OperatorKey::Plus)), "2+");
        assert_eq!(insert("5", Key::Operator(OperatorKey::Power)), "5^");
        assert_eq!(insert("", Key::Operator(OperatorKey::Divide)), "/");
    }

    #[test]
    fn test_function_prefixes() {
        for f in FunctionKey::ALL {
            assert_eq!(insert("", Key::Function(f)), format!("{}(", f.name()));
        }
        assert_eq!(insert("3*", Key::Function(FunctionKey::Sin)), "3*sin(");
    }

    #[test]
    fn test_radical_kept_as_symbol() {
        assert_eq!(insert("", Key::Sqrt), "√(");
        assert_eq!(insert("2+", Key::Sqrt), "2+√(");
    }

    #[test]
    fn test_non_inserting_keys_leave_buffer() {
        for key in [
            Key::AllClear,
            Key::Clear,
            Key::Backspace,
            Key::Equals,
            Key::CloseParen,
        ] {
            assert_eq!(insertion(key), None);
            assert_eq!(insert("1+2", key), "1+2");
        }
    }
}
