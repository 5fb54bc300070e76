//! AST evaluator
//!
//! Walks the tree produced by [`Parser`](crate::core::parser::Parser) and
//! delegates every step to the [`Calculator`] so each intermediate value is
//! validated.

use crate::core::parser::{AstNode, Parser};
use crate::core::{AnomalyValidator, CalcResult, Calculator, Evaluate, Operation};

/// Evaluator for AST expressions
#[derive(Debug, Default)]
pub struct Evaluator {
    calculator: Calculator,
}

impl Evaluator {
    /// Creates a new evaluator with default settings
    #[must_use]
    pub fn new() -> Self {
        Self {
            calculator: Calculator::new(),
        }
    }

    /// Creates an evaluator with a custom validator
    #[must_use]
    pub fn with_validator(validator: AnomalyValidator) -> Self {
        Self {
            calculator: Calculator::with_validator(validator),
        }
    }

    /// Evaluates an AST node and returns the result
    pub fn evaluate_ast(&self, node: &AstNode) -> CalcResult<f64> {
        match node {
            AstNode::Number(n) => Ok(*n),
            AstNode::Negate(inner) => {
                let value = self.evaluate_ast(inner)?;
                self.calculator.calculate(value, -1.0, Operation::Multiply)
            }
            AstNode::BinaryOp { left, op, right } => {
                let left_val = self.evaluate_ast(left)?;
                let right_val = self.evaluate_ast(right)?;
                self.calculator.calculate(left_val, right_val, *op)
            }
            AstNode::Call { function, arg } => {
                let value = self.evaluate_ast(arg)?;
                self.calculator.call(*function, value)
            }
        }
    }

    /// Parses and evaluates a string expression
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        let ast = Parser::parse_str(input)?;
        let value = self.evaluate_ast(&ast)?;
        self.calculator.validate(value)
    }

    /// Returns the validator applied to every intermediate result
    #[must_use]
    pub fn validator(&self) -> &AnomalyValidator {
        &self.calculator.validator
    }
}

impl Evaluate for Evaluator {
    fn evaluate(&mut self, expression: &str) -> CalcResult<f64> {
        self.evaluate_str(expression)
    }
}
