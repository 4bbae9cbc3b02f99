//! Recursive-descent parser and tree-walking evaluator.
//!
//! # Precedence (lowest first)
//! - `cond ? a : b` (right-associative)
//! - `||`, then `&&`
//! - `== != === !==`
//! - `< > <= >=`
//! - `+ -`, then `* / %`
//! - unary `! - +`

use super::context::Context;
use super::lexer::{tokenize, Spanned, Token};
use super::value::Value;
use super::EvaluationError;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Negate,
    Plus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Variable(String),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Logical(LogicalOp, Box<Expr>, Box<Expr>),
    Conditional(Box<Expr>, Box<Expr>, Box<Expr>),
}

/// A parsed predicate, reusable across contexts.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Expr,
}

impl Expression {
    pub fn parse(source: &str) -> Result<Self, EvaluationError> {
        let tokens = tokenize(source).map_err(|err| EvaluationError::Syntax {
            expression: source.to_string(),
            position: err.offset,
            message: err.message,
        })?;
        let mut parser = Parser {
            source,
            tokens,
            cursor: 0,
        };
        let root = parser.conditional()?;
        if let Some(extra) = parser.peek_spanned() {
            return Err(parser.error_at(extra.offset, "unexpected trailing input"));
        }
        Ok(Self {
            source: source.to_string(),
            root,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Expr {
        &self.root
    }

    pub fn evaluate(&self, ctx: &Context) -> Result<Value, EvaluationError> {
        eval(&self.root, ctx, &self.source)
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Spanned>,
    cursor: usize,
}

impl<'a> Parser<'a> {
    fn peek_spanned(&self) -> Option<&Spanned> {
        self.tokens.get(self.cursor)
    }

    fn peek(&self) -> Option<&Token> {
        self.peek_spanned().map(|spanned| &spanned.token)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let next = self.tokens.get(self.cursor).cloned();
        if next.is_some() {
            self.cursor += 1;
        }
        next
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn error_at(&self, position: usize, message: &str) -> EvaluationError {
        EvaluationError::Syntax {
            expression: self.source.to_string(),
            position,
            message: message.to_string(),
        }
    }

    fn error_here(&self, message: &str) -> EvaluationError {
        let position = self
            .peek_spanned()
            .map(|spanned| spanned.offset)
            .unwrap_or(self.source.len());
        self.error_at(position, message)
    }

    fn expect(&mut self, expected: Token, message: &str) -> Result<(), EvaluationError> {
        if self.eat(&expected) {
            Ok(())
        } else {
            Err(self.error_here(message))
        }
    }

    fn conditional(&mut self) -> Result<Expr, EvaluationError> {
        let condition = self.logical_or()?;
        if !self.eat(&Token::Question) {
            return Ok(condition);
        }
        let when_true = self.conditional()?;
        self.expect(Token::Colon, "expected `:` in conditional expression")?;
        let when_false = self.conditional()?;
        Ok(Expr::Conditional(
            Box::new(condition),
            Box::new(when_true),
            Box::new(when_false),
        ))
    }

    fn logical_or(&mut self) -> Result<Expr, EvaluationError> {
        let mut left = self.logical_and()?;
        while self.eat(&Token::OrOr) {
            let right = self.logical_and()?;
            left = Expr::Logical(LogicalOp::Or, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn logical_and(&mut self) -> Result<Expr, EvaluationError> {
        let mut left = self.equality()?;
        while self.eat(&Token::AndAnd) {
            let right = self.equality()?;
            left = Expr::Logical(LogicalOp::And, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn equality(&mut self) -> Result<Expr, EvaluationError> {
        let mut left = self.relational()?;
        loop {
            let op = match self.peek() {
                Some(Token::EqEq) => BinaryOp::Eq,
                Some(Token::NotEq) => BinaryOp::NotEq,
                Some(Token::StrictEq) => BinaryOp::StrictEq,
                Some(Token::StrictNotEq) => BinaryOp::StrictNotEq,
                _ => return Ok(left),
            };
            self.cursor += 1;
            let right = self.relational()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
    }

    fn relational(&mut self) -> Result<Expr, EvaluationError> {
        let mut left = self.additive()?;
        loop {
            let op = match self.peek() {
                Some(Token::Lt) => BinaryOp::Lt,
                Some(Token::Gt) => BinaryOp::Gt,
                Some(Token::Le) => BinaryOp::Le,
                Some(Token::Ge) => BinaryOp::Ge,
                _ => return Ok(left),
            };
            self.cursor += 1;
            let right = self.additive()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
    }

    fn additive(&mut self) -> Result<Expr, EvaluationError> {
        let mut left = self.multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => return Ok(left),
            };
            self.cursor += 1;
            let right = self.multiplicative()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
    }

    fn multiplicative(&mut self) -> Result<Expr, EvaluationError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Rem,
                _ => return Ok(left),
            };
            self.cursor += 1;
            let right = self.unary()?;
            left = Expr::Binary(op, Box::new(left), Box::new(right));
        }
    }

    fn unary(&mut self) -> Result<Expr, EvaluationError> {
        let op = match self.peek() {
            Some(Token::Bang) => UnaryOp::Not,
            Some(Token::Minus) => UnaryOp::Negate,
            Some(Token::Plus) => UnaryOp::Plus,
            _ => return self.primary(),
        };
        self.cursor += 1;
        let operand = self.unary()?;
        Ok(Expr::Unary(op, Box::new(operand)))
    }

    fn primary(&mut self) -> Result<Expr, EvaluationError> {
        let Some(spanned) = self.advance() else {
            return Err(self.error_here("unexpected end of expression"));
        };
        match spanned.token {
            Token::Number(number) => Ok(Expr::Literal(Value::Number(number))),
            Token::Str(text) => Ok(Expr::Literal(Value::Str(text))),
            Token::True => Ok(Expr::Literal(Value::Bool(true))),
            Token::False => Ok(Expr::Literal(Value::Bool(false))),
            Token::Ident(name) => Ok(Expr::Variable(name)),
            Token::LParen => {
                let inner = self.conditional()?;
                self.expect(Token::RParen, "expected `)`")?;
                Ok(inner)
            }
            _ => Err(self.error_at(spanned.offset, "expected a value")),
        }
    }
}

fn eval(expr: &Expr, ctx: &Context, source: &str) -> Result<Value, EvaluationError> {
    match expr {
        Expr::Literal(value) => Ok(value.clone()),
        Expr::Variable(name) => {
            ctx.get(name)
                .cloned()
                .ok_or_else(|| EvaluationError::UnknownVariable {
                    expression: source.to_string(),
                    name: name.clone(),
                })
        }
        Expr::Unary(op, operand) => {
            let value = eval(operand, ctx, source)?;
            Ok(match op {
                UnaryOp::Not => Value::Bool(!value.is_truthy()),
                UnaryOp::Negate => Value::Number(-value.to_number()),
                UnaryOp::Plus => Value::Number(value.to_number()),
            })
        }
        Expr::Logical(op, left, right) => {
            let left = eval(left, ctx, source)?;
            match (op, left.is_truthy()) {
                (LogicalOp::And, false) | (LogicalOp::Or, true) => Ok(left),
                _ => eval(right, ctx, source),
            }
        }
        Expr::Conditional(condition, when_true, when_false) => {
            if eval(condition, ctx, source)?.is_truthy() {
                eval(when_true, ctx, source)
            } else {
                eval(when_false, ctx, source)
            }
        }
        Expr::Binary(op, left, right) => {
            let left = eval(left, ctx, source)?;
            let right = eval(right, ctx, source)?;
            Ok(apply_binary(*op, &left, &right))
        }
    }
}

fn apply_binary(op: BinaryOp, left: &Value, right: &Value) -> Value {
    let ordering = || left.compare(right);
    match op {
        BinaryOp::Add => left.plus(right),
        BinaryOp::Sub => Value::Number(left.to_number() - right.to_number()),
        BinaryOp::Mul => Value::Number(left.to_number() * right.to_number()),
        BinaryOp::Div => Value::Number(left.to_number() / right.to_number()),
        BinaryOp::Rem => Value::Number(left.to_number() % right.to_number()),
        BinaryOp::Eq => Value::Bool(left.loose_eq(right)),
        BinaryOp::NotEq => Value::Bool(!left.loose_eq(right)),
        BinaryOp::StrictEq => Value::Bool(left.strict_eq(right)),
        BinaryOp::StrictNotEq => Value::Bool(!left.strict_eq(right)),
        BinaryOp::Lt => Value::Bool(ordering() == Some(Ordering::Less)),
        BinaryOp::Gt => Value::Bool(ordering() == Some(Ordering::Greater)),
        BinaryOp::Le => Value::Bool(matches!(
            ordering(),
            Some(Ordering::Less | Ordering::Equal)
        )),
        BinaryOp::Ge => Value::Bool(matches!(
            ordering(),
            Some(Ordering::Greater | Ordering::Equal)
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditional_is_right_associative() {
        let parsed = Expression::parse("a ? 1 : b ? 2 : 3").unwrap();
        let Expr::Conditional(_, _, when_false) = parsed.root() else {
            panic!("expected conditional root");
        };
        assert!(matches!(**when_false, Expr::Conditional(..)));
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        let value = Expression::parse("1 + 2 * 3")
            .unwrap()
            .evaluate(&Context::new())
            .unwrap();
        assert_eq!(value, Value::from(7));
    }

    #[test]
    fn short_circuit_skips_unknown_variables() {
        let ctx = Context::new().with("x", 0);
        let value = Expression::parse("x && missing")
            .unwrap()
            .evaluate(&ctx)
            .unwrap();
        assert_eq!(value, Value::from(0));
    }

    #[test]
    fn rejects_trailing_tokens() {
        let err = Expression::parse("1 2").unwrap_err();
        assert!(matches!(err, EvaluationError::Syntax { position: 2, .. }));
    }
}
