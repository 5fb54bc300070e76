//! Buffer to evaluator syntax
//!
//! Formatting runs in two phases and the order matters: the symbol rewrites
//! can introduce `(` characters, so the closer padding is counted on the
//! rewritten text, never on the raw buffer.

use crate::buffer::balance::missing_closers;

/// A literal find-and-replace applied to the whole buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewriteRule {
    /// Text to find
    pub from: &'static str,
    /// Replacement text
    pub to: &'static str,
}

impl RewriteRule {
    /// Applies the rule to every occurrence
    #[must_use]
    pub fn apply(&self, expression: &str) -> String {
        expression.replace(self.from, self.to)
    }
}

/// Rewrite pipeline, applied in order
pub const REWRITE_RULES: [RewriteRule; 2] = [
    RewriteRule {
        from: "√(",
        to: "sqrt(",
    },
    RewriteRule { from: "^", to: "**" },
];

/// Runs the rewrite pipeline without balancing
#[must_use]
pub fn rewrite(buffer: &str) -> String {
    REWRITE_RULES
        .iter()
        .fold(buffer.to_string(), |acc, rule| rule.apply(&acc))
}

/// Rewrites the buffer and pads the missing closing parentheses
///
/// Total: malformed input passes straight through for the evaluator to
/// reject.
#[must_use]
pub fn format_expression(buffer: &str) -> String {
    let mut formatted = rewrite(buffer);
    let missing = missing_closers(&formatted);
    formatted.push_str(&")".repeat(missing));
    formatted
}
