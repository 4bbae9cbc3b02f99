//! Calendar arithmetic collaborators.
//!
//! # Responsibility
//! - Represent dates on the Julian calendar and convert to/from Gregorian.
//! - Compute the paschalion (date of Pascha and the yearly cycles).
//! - Compute sunrise/sunset for a date and a location.
//!
//! # Invariants
//! - Every `JDate` is backed by a valid Julian day number.
//! - All functions are stateless closed-form computations.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod jdate;
pub mod paschalion;
pub mod sunrise;

pub use jdate::JDate;
pub use paschalion::{pascha, Paschalion};
pub use sunrise::{HourMinute, Observation};

pub type DateResult<T> = Result<T, DateError>;

/// Out-of-range calendar input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    InvalidMonth(u32),
    InvalidDay { year: i32, month: u32, day: u32 },
    YearOutOfRange { year: i32, minimum: i32 },
    /// Year outside the range dates can be built for.
    UnsupportedYear(i32),
    UnknownObservation(String),
}

impl Display for DateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth(month) => write!(f, "bad month value: {month}"),
            Self::InvalidDay { year, month, day } => {
                write!(f, "bad day value: {day} (year {year}, month {month})")
            }
            Self::YearOutOfRange { year, minimum } => {
                write!(f, "year {year} is out of range; expected >= {minimum}")
            }
            Self::UnsupportedYear(year) => write!(
                f,
                "year {year} is not supported; expected {}..={}",
                jdate::MIN_YEAR,
                jdate::MAX_YEAR
            ),
            Self::UnknownObservation(value) => write!(
                f,
                "unrecognized observation `{value}`; expected default|civil|nautical|amateur|astronomical"
            ),
        }
    }
}

impl Error for DateError {}
