//! Predicate expressions embedded in content documents.
//!
//! # Responsibility
//! - Evaluate `Cmd`, `Tone` and command `Value` attributes against a day context.
//! - Provide dynamic value semantics (truthiness, coercion) for those results.
//!
//! # Invariants
//! - Evaluation is pure: the context is never mutated.
//! - Referencing a variable absent from the context is an error, except on a
//!   branch skipped by `&&`, `||` or `?:`.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod context;
pub mod lexer;
pub mod parser;
pub mod value;

pub use context::{vars, Context};
pub use parser::Expression;
pub use value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    Syntax {
        expression: String,
        position: usize,
        message: String,
    },
    UnknownVariable {
        expression: String,
        name: String,
    },
}

impl EvaluationError {
    pub fn expression(&self) -> &str {
        match self {
            Self::Syntax { expression, .. } | Self::UnknownVariable { expression, .. } => {
                expression
            }
        }
    }
}

impl Display for EvaluationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax {
                expression,
                position,
                message,
            } => write!(
                f,
                "syntax error in `{expression}` at offset {position}: {message}"
            ),
            Self::UnknownVariable { expression, name } => {
                write!(f, "unknown variable `{name}` in `{expression}`")
            }
        }
    }
}

impl Error for EvaluationError {}

/// Parses and evaluates `expression` in one step.
pub fn evaluate(expression: &str, ctx: &Context) -> Result<Value, EvaluationError> {
    Expression::parse(expression)?.evaluate(ctx)
}
