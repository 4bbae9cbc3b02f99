//! Document event streams and the conditional tree scanner.
//!
//! # Responsibility
//! - Turn XML content documents into a flat depth-first event list.
//! - Suppress subtrees whose `Cmd` predicate evaluates falsy.
//!
//! # Invariants
//! - Every yielded `Enter` has exactly one matching yielded `Exit`.
//! - A document without `Cmd` attributes passes through unchanged.
//! - Predicate failures propagate; they never silently suppress a subtree.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod filter;
pub mod reader;

pub use filter::{scan_filter, Filtered, ScanFilter};
pub use reader::read_events;

/// Attribute reserved for an element's guard predicate.
pub const CMD_ATTRIBUTE: &str = "Cmd";

pub type Attributes = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Enter { tag: String, attrib: Attributes },
    Exit { tag: String },
    Text(String),
}

impl Event {
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Enter { tag, .. } | Self::Exit { tag } => Some(tag),
            Self::Text(_) => None,
        }
    }
}

/// Document is not well-formed XML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlError {
    pub position: usize,
    pub message: String,
}

impl Display for XmlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "malformed XML at byte {}: {}", self.position, self.message)
    }
}

impl Error for XmlError {}
