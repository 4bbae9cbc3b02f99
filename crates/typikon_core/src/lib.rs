//! Rule-driven liturgical calendar engine.
//!
//! Resolves, for a Julian date and a language, the commemorations, tone,
//! fasting rule and liturgy readings of that day from a content store of
//! XML documents guarded by embedded predicates.

pub mod calendar;
pub mod config;
pub mod db;
pub mod expr;
pub mod logging;
pub mod model;
pub mod parse;
pub mod scan;
pub mod service;
pub mod store;

pub use calendar::{pascha, DateError, HourMinute, JDate, Observation, Paschalion};
pub use config::{ConfigError, TypikonConfig};
pub use expr::{evaluate, Context, EvaluationError, Value};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::{
    Command, Commemoration, CycleSource, LiturgicalDay, Reading, Service, ServiceType,
};
pub use parse::ParseError;
pub use service::{DayFacts, DayService, ResolveError, ResolveResult};
pub use store::{
    ContentStore, FsContentStore, Library, MemoryContentStore, SqliteContentStore, StoreError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
