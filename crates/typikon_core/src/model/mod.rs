//! Liturgical domain records.
//!
//! # Responsibility
//! - Define the records produced by the document parsers.
//! - Define the day snapshot returned by the resolution engine.
//!
//! # Invariants
//! - Serialized field names follow the calendar-renderer wire format
//!   (`src`, `type`, `ref`, `effWeek`, `dayRank`, `fastingCode`, `saints`).
//! - Records carry no references to stores or contexts.

pub mod command;
pub mod commemoration;
pub mod day;

pub use command::{any_command_holds, Command};
pub use commemoration::{
    merge_attributes, Commemoration, CycleSource, Life, LifeDocument, Reading, Service,
    ServiceType,
};
pub use day::LiturgicalDay;
