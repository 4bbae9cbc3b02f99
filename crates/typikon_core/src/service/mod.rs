//! Day resolution use-cases.
//!
//! # Responsibility
//! - Assemble a `LiturgicalDay` from the documents of one date.
//! - Apply reading transfer and suppression rules across adjacent days.
//!
//! # Invariants
//! - Every failure is surfaced to the caller; nothing is retried here.
//! - Adjacent days are resolved without transfers (recursion depth 1).
//!
//! # See also
//! - `store::Library` for document lookup order.

use crate::calendar::DateError;
use crate::expr::EvaluationError;
use crate::parse::ParseError;
use crate::store::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod day_facts;
pub mod day_service;
mod transfer;

pub use day_facts::{DayFacts, MovableCycle};
pub use day_service::DayService;

pub type ResolveResult<T> = Result<T, ResolveError>;

#[derive(Debug)]
pub enum ResolveError {
    Store(StoreError),
    /// Document shape does not match its kind.
    MalformedDocument { path: String, source: ParseError },
    /// A predicate could not be evaluated.
    Evaluation {
        path: Option<String>,
        source: EvaluationError,
    },
    /// The movable-cycle document produced no commemoration.
    MissingMovableCommemoration { path: String },
    InvalidDate(DateError),
}

impl ResolveError {
    /// Attributes a parser failure to the document it came from.
    pub(crate) fn in_document(path: &str, err: ParseError) -> Self {
        match err {
            ParseError::Evaluation(source) => Self::Evaluation {
                path: Some(path.to_string()),
                source,
            },
            source => Self::MalformedDocument {
                path: path.to_string(),
                source,
            },
        }
    }
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::MalformedDocument { path, source } => {
                write!(f, "malformed document `{path}`: {source}")
            }
            Self::Evaluation {
                path: Some(path),
                source,
            } => write!(f, "in `{path}`: {source}"),
            Self::Evaluation { path: None, source } => write!(f, "{source}"),
            Self::MissingMovableCommemoration { path } => {
                write!(f, "movable-cycle document `{path}` yielded no commemoration")
            }
            Self::InvalidDate(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ResolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::MalformedDocument { source, .. } => Some(source),
            Self::Evaluation { source, .. } => Some(source),
            Self::InvalidDate(err) => Some(err),
            Self::MissingMovableCommemoration { .. } => None,
        }
    }
}

impl From<StoreError> for ResolveError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<EvaluationError> for ResolveError {
    fn from(value: EvaluationError) -> Self {
        Self::Evaluation {
            path: None,
            source: value,
        }
    }
}

impl From<DateError> for ResolveError {
    fn from(value: DateError) -> Self {
        Self::InvalidDate(value)
    }
}
