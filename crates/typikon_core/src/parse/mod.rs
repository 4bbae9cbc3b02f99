//! Parsers that turn filtered document streams into domain records.
//!
//! # Responsibility
//! - Read cycle, fasting, command and biography documents.
//! - Reject documents whose element shape does not match their kind.
//!
//! # Invariants
//! - Every parser sees the stream only after `Cmd` filtering.
//! - Output preserves document order.
//! - Only the biography parser mutates the context (`dRank` on `SERVICE`).
//!
//! # See also
//! - `scan` for the filtering state machine.

use crate::expr::{Context, EvaluationError};
use crate::scan::{read_events, scan_filter, Attributes, Event, XmlError};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod commands;
mod commemorations;
mod fasting;
mod life;

pub use commands::parse_commands;
pub use commemorations::parse_commemorations;
pub use fasting::parse_fasting_rules;
pub use life::parse_life;

pub type ParseResult<T> = Result<T, ParseError>;

/// Document could not be read into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Xml(XmlError),
    Evaluation(EvaluationError),
    UnexpectedTag {
        tag: String,
        expected: &'static [&'static str],
    },
    MissingAttribute {
        tag: String,
        attribute: &'static str,
    },
    UnexpectedAttribute {
        tag: String,
        attribute: &'static str,
    },
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Xml(err) => write!(f, "{err}"),
            Self::Evaluation(err) => write!(f, "{err}"),
            Self::UnexpectedTag { tag, expected } => write!(
                f,
                "unexpected element <{tag}>; expected one of {}",
                expected.join(", ")
            ),
            Self::MissingAttribute { tag, attribute } => {
                write!(f, "element <{tag}> is missing required attribute `{attribute}`")
            }
            Self::UnexpectedAttribute { tag, attribute } => {
                write!(f, "element <{tag}> must not carry attribute `{attribute}`")
            }
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Xml(err) => Some(err),
            Self::Evaluation(err) => Some(err),
            Self::UnexpectedTag { .. }
            | Self::MissingAttribute { .. }
            | Self::UnexpectedAttribute { .. } => None,
        }
    }
}

impl From<XmlError> for ParseError {
    fn from(value: XmlError) -> Self {
        Self::Xml(value)
    }
}

impl From<EvaluationError> for ParseError {
    fn from(value: EvaluationError) -> Self {
        Self::Evaluation(value)
    }
}

/// Reads and filters a whole document, keeping only surviving `Enter` events.
fn filtered_elements(text: &str, ctx: &Context) -> ParseResult<Vec<(String, Attributes)>> {
    let mut elements = Vec::new();
    for event in scan_filter(read_events(text)?, ctx) {
        if let Event::Enter { tag, attrib } = event? {
            elements.push((tag, attrib));
        }
    }
    Ok(elements)
}

fn expect_tag(tag: &str, expected: &'static [&'static str]) -> ParseResult<()> {
    if expected.contains(&tag) {
        Ok(())
    } else {
        Err(ParseError::UnexpectedTag {
            tag: tag.to_string(),
            expected,
        })
    }
}

fn required<'a>(
    tag: &str,
    attrib: &'a Attributes,
    attribute: &'static str,
) -> ParseResult<&'a str> {
    attrib
        .get(attribute)
        .map(String::as_str)
        .ok_or_else(|| ParseError::MissingAttribute {
            tag: tag.to_string(),
            attribute,
        })
}
