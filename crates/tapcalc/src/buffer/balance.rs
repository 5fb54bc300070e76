//! Parenthesis counting and balancing

/// Number of `(` characters
#[must_use]
pub fn open_count(expression: &str) -> usize {
    expression.matches('(').count()
}

/// Number of `)` characters
#[must_use]
pub fn close_count(expression: &str) -> usize {
    expression.matches(')').count()
}

/// Closers needed to balance the expression, clamped at zero
#[must_use]
pub fn missing_closers(expression: &str) -> usize {
    open_count(expression).saturating_sub(close_count(expression))
}

/// Applies the `)` key: appends only while a parenthesis is still open
#[must_use]
pub fn close_paren(buffer: &str) -> String {
    if open_count(buffer) > close_count(buffer) {
        format!("{buffer})")
    } else {
        buffer.to_string()
    }
}
