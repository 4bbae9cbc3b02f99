//! Named-variable context for expression evaluation.

use super::value::Value;
use std::collections::BTreeMap;

/// Variable names that content documents reference in predicates.
pub mod vars {
    pub const DAY_OF_WEEK: &str = "dow";
    pub const DAY_OF_YEAR: &str = "doy";
    /// Days since this year's Pascha.
    pub const NDAY: &str = "nday";
    /// Days since last year's Pascha.
    pub const NDAY_PREVIOUS: &str = "ndayP";
    /// Days since next year's Pascha (negative).
    pub const NDAY_NEXT: &str = "ndayF";
    pub const YEAR: &str = "Year";
    pub const GS: &str = "GS";
    /// Mutable during a biography walk; see `parse::life`.
    pub const DAY_RANK: &str = "dRank";
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    vars: BTreeMap<String, Value>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(name, value)| (name.as_str(), value))
    }
}
