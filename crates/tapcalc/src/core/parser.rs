//! Tokenizer and recursive descent parser for formatted expressions

use crate::core::{CalcError, CalcResult, Function, Operation};

/// Named constants usable inside expressions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    /// Archimedes' constant
    Pi,
    /// Euler's number
    E,
}

impl Constant {
    /// Numeric value of the constant
    #[must_use]
    pub const fn value(&self) -> f64 {
        match self {
            Self::Pi => std::f64::consts::PI,
            Self::E => std::f64::consts::E,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }
}

/// Token types from lexical analysis
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// Binary operator
    Operator(Operation),
    /// Function name (always followed by a parenthesised argument)
    Function(Function),
    /// Named constant
    Constant(Constant),
    /// Left parenthesis
    LeftParen,
    /// Right parenthesis
    RightParen,
}

impl Token {
    /// Returns true if this token is an operator
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_))
    }

    /// Returns true if this token is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Returns true if a value juxtaposed before this token multiplies it
    #[must_use]
    pub const fn starts_implicit_operand(&self) -> bool {
        matches!(
            self,
            Self::Function(_) | Self::Constant(_) | Self::LeftParen
        )
    }
}

/// Abstract Syntax Tree node
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Numeric literal
    Number(f64),
    /// Binary operation
    BinaryOp {
        /// Left operand
        left: Box<AstNode>,
        /// Operator
        op: Operation,
        /// Right operand
        right: Box<AstNode>,
    },
    /// Unary negation
    Negate(Box<AstNode>),
    /// Function application
    Call {
        /// Function being applied
        function: Function,
        /// Its single argument
        arg: Box<AstNode>,
    },
}

impl AstNode {
    /// Creates a new number node
    #[must_use]
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    /// Creates a new binary operation node
    #[must_use]
    pub fn binary(left: AstNode, op: Operation, right: AstNode) -> Self {
        Self::BinaryOp {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    /// Creates a new negation node
    #[must_use]
    pub fn negate(inner: AstNode) -> Self {
        Self::Negate(Box::new(inner))
    }

    /// Creates a new function call node
    #[must_use]
    pub fn call(function: Function, arg: AstNode) -> Self {
        Self::Call {
            function,
            arg: Box::new(arg),
        }
    }
}

/// Tokenizer for converting expression strings to tokens
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new tokenizer for the given input
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Returns the remaining input
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.pos..]
    }

    /// Tokenizes the entire input
    pub fn tokenize(&mut self) -> CalcResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or None if at end of input
    pub fn next_token(&mut self) -> CalcResult<Option<Token>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        let token = match ch {
            '0'..='9' | '.' => self.read_number()?,
            'a'..='z' | 'A'..='Z' => self.read_identifier()?,
            '+' => self.single(Token::Operator(Operation::Add)),
            '-' => self.single(Token::Operator(Operation::Subtract)),
            '*' => {
                self.advance();
                if self.current_char() == Some('*') {
                    self.advance();
                    Token::Operator(Operation::Power)
                } else {
                    Token::Operator(Operation::Multiply)
                }
            }
            '/' => self.single(Token::Operator(Operation::Divide)),
            '^' => self.single(Token::Operator(Operation::Power)),
            '(' => self.single(Token::LeftParen),
            ')' => self.single(Token::RightParen),
            _ => {
                return Err(CalcError::ParseError(format!(
                    "Unexpected character: '{ch}'"
                )));
            }
        };

        Ok(Some(token))
    }

    fn single(&mut self, token: Token) -> Token {
        self.advance();
        token
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn read_number(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        let mut has_dot = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                self.advance();
            } else if ch == '.' && !has_dot {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        // Exponent part, only when digits follow (`2e` is 2 times e)
        if matches!(self.current_char(), Some('e' | 'E')) {
            let digits_at = match self.peek_char(1) {
                Some('+' | '-') => 2,
                _ => 1,
            };
            if self.peek_char(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digits_at {
                    self.advance();
                }
                while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        let num_str = &self.input[start..self.pos];
        let value: f64 = num_str
            .parse()
            .map_err(|_| CalcError::ParseError(format!("Invalid number: '{num_str}'")))?;

        Ok(Token::Number(value))
    }

    fn read_identifier(&mut self) -> CalcResult<Token> {
        let start = self.pos;
        while self.current_char().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        let name = &self.input[start..self.pos];

        if let Some(function) = Function::from_name(name) {
            return Ok(Token::Function(function));
        }
        if let Some(constant) = Constant::from_name(name) {
            return Ok(Token::Constant(constant));
        }
        Err(CalcError::UnknownFunction(name.to_string()))
    }
}

/// Deepest nesting of signs, powers and parentheses the parser accepts
pub const MAX_DEPTH: usize = 256;

/// Longest token stream the parser accepts; bounds the height of operator
/// chains in the AST
pub const MAX_TOKENS: usize = 1024;

/// Recursive descent parser for expressions
///
/// Grammar:
/// ```text
/// expression ::= term (('+' | '-') term)*
/// term       ::= unary (('*' | '/') unary | power)*   // bare power: implicit '*'
/// unary      ::= ('-' | '+') unary | power
/// power      ::= primary (('**' | '^') unary)?        // right associative
/// primary    ::= NUMBER | CONSTANT | FUNCTION '(' expression ')' | '(' expression ')'
/// ```
///
/// Nesting beyond [`MAX_DEPTH`] or input beyond [`MAX_TOKENS`] is a
/// [`CalcError::ParseError`].
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    /// Creates a new parser from tokens
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parses a string expression into an AST
    pub fn parse_str(input: &str) -> CalcResult<AstNode> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(CalcError::EmptyExpression);
        }

        let tokens = Tokenizer::new(trimmed).tokenize()?;
        Self::new(tokens).parse()
    }

    /// Parses tokens into an AST, requiring every token to be consumed
    pub fn parse(&mut self) -> CalcResult<AstNode> {
        if self.tokens.is_empty() {
            return Err(CalcError::EmptyExpression);
        }
        if self.tokens.len() > MAX_TOKENS {
            return Err(CalcError::ParseError(format!(
                "Expression longer than {MAX_TOKENS} tokens"
            )));
        }

        let ast = self.parse_expression()?;

        if let Some(token) = self.current() {
            return Err(CalcError::ParseError(format!(
                "Unexpected token {token:?} at position {}",
                self.pos
            )));
        }

        Ok(ast)
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Runs one nested production, failing once [`MAX_DEPTH`] is exceeded
    fn nested<T>(&mut self, parse: impl FnOnce(&mut Self) -> CalcResult<T>) -> CalcResult<T> {
        if self.depth >= MAX_DEPTH {
            return Err(CalcError::ParseError(format!(
                "Expression nested deeper than {MAX_DEPTH} levels"
            )));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn parse_expression(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_term()?;

        while let Some(Token::Operator(op @ (Operation::Add | Operation::Subtract))) =
            self.current()
        {
            let op = *op;
            self.advance();
            let right = self.parse_term()?;
            left = AstNode::binary(left, op, right);
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> CalcResult<AstNode> {
        let mut left = self.parse_unary()?;

        loop {
            match self.current() {
                Some(Token::Operator(op @ (Operation::Multiply | Operation::Divide))) => {
                    let op = *op;
                    self.advance();
                    let right = self.parse_unary()?;
                    left = AstNode::binary(left, op, right);
                }
                Some(token) if token.starts_implicit_operand() => {
                    let right = self.parse_power()?;
                    left = AstNode::binary(left, Operation::Multiply, right);
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> CalcResult<AstNode> {
        match self.current() {
            Some(Token::Operator(Operation::Subtract)) => {
                self.advance();
                Ok(AstNode::negate(self.nested(Self::parse_unary)?))
            }
            Some(Token::Operator(Operation::Add)) => {
                self.advance();
                self.nested(Self::parse_unary)
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> CalcResult<AstNode> {
        self.nested(Self::parse_power_inner)
    }

    fn parse_power_inner(&mut self) -> CalcResult<AstNode> {
        let base = self.parse_primary()?;

        if matches!(self.current(), Some(Token::Operator(Operation::Power))) {
            self.advance();
            // Exponent may itself be signed or another power
            let exponent = self.parse_unary()?;
            return Ok(AstNode::binary(base, Operation::Power, exponent));
        }

        Ok(base)
    }

    fn parse_primary(&mut self) -> CalcResult<AstNode> {
        let token = self
            .advance()
            .ok_or_else(|| CalcError::ParseError("Unexpected end of expression".into()))?;

        match token {
            Token::Number(n) => Ok(AstNode::number(n)),
            Token::Constant(c) => Ok(AstNode::number(c.value())),
            Token::LeftParen => self.nested(Self::parse_group),
            Token::Function(function) => match self.advance() {
                Some(Token::LeftParen) => {
                    Ok(AstNode::call(function, self.nested(Self::parse_group)?))
                }
                _ => Err(CalcError::ParseError(format!(
                    "Expected '(' after {}",
                    function.name()
                ))),
            },
            other => Err(CalcError::ParseError(format!(
                "Unexpected token: {other:?}"
            ))),
        }
    }

    /// Parses `expression ')'` after an opening parenthesis was consumed
    fn parse_group(&mut self) -> CalcResult<AstNode> {
        let expr = self.parse_expression()?;
        match self.advance() {
            Some(Token::RightParen) => Ok(expr),
            Some(t) => Err(CalcError::ParseError(format!(
                "Expected ')' but found {t:?}"
            ))),
            None => Err(CalcError::ParseError("Unclosed parenthesis".into())),
        }
    }
}
