//! Julian calendar date.
//!
//! # Invariants
//! - `jday` is the Julian day number of (`year`, `month`, `day`) on the
//!   Julian calendar.
//! - Dates before the Gregorian reform are identical on both calendars.

use super::sunrise::{sunrise_sunset, HourMinute, Observation};
use super::{DateError, DateResult};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// First Gregorian date, and the Julian date it replaced.
const GREGORIAN_INCEPTION: (i32, u32, u32) = (1582, 10, 15);
const GREGORIAN_INCEPTION_AS_JULIAN: (i32, u32, u32) = (1582, 10, 5);

/// Days before the first of each month on a non-leap year.
const DAYS_BEFORE_MONTH: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Years accepted by the validating constructors. Neighbouring years'
/// Pascha must stay representable.
pub const MIN_YEAR: i32 = -999_999;
pub const MAX_YEAR: i32 = 999_999;

/// Day-of-year slot reserved for the Julian leap day.
pub const LEAP_DAY_OF_YEAR: u32 = 366;

/// A date on the Julian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct JDate {
    #[serde(skip)]
    jday: i64,
    year: i32,
    month: u32,
    day: u32,
}

impl JDate {
    /// Creates a Julian date, validating month and day ranges.
    pub fn new(year: i32, month: u32, day: u32) -> DateResult<Self> {
        validate_ymd(year, month, day, true)?;
        Ok(Self {
            jday: julian_day_number(year, month, day, true),
            year,
            month,
            day,
        })
    }

    /// Builds a date from fields already known to be in range.
    pub(crate) fn from_trusted_ymd(year: i32, month: u32, day: u32) -> Self {
        Self {
            jday: julian_day_number(year, month, day, true),
            year,
            month,
            day,
        }
    }

    /// Creates the Julian date for a Julian day number.
    pub fn from_julian_day(jday: i64) -> Self {
        let (year, month, day) = ymd_from_julian_day(jday, true);
        Self {
            jday,
            year,
            month,
            day,
        }
    }

    /// Converts a Gregorian calendar date into its Julian counterpart.
    ///
    /// Dates before 1582-10-15 are taken as already Julian; the ten
    /// dropped days of the reform clamp to 1582-10-05.
    pub fn from_gregorian(year: i32, month: u32, day: u32) -> DateResult<Self> {
        validate_ymd(year, month, day, false)?;
        let ymd = (year, month, day);
        if ymd < GREGORIAN_INCEPTION {
            let (year, month, day) = if ymd > GREGORIAN_INCEPTION_AS_JULIAN {
                GREGORIAN_INCEPTION_AS_JULIAN
            } else {
                ymd
            };
            return Self::new(year, month, day);
        }
        Ok(Self::from_julian_day(julian_day_number(
            year, month, day, false,
        )))
    }

    pub fn julian_day(&self) -> i64 {
        self.jday
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Day of week, 0 is Sunday.
    pub fn day_of_week(&self) -> u32 {
        (self.jday + 1).rem_euclid(7) as u32
    }

    /// Day of year with Jan 1 as 0, counted on a non-leap layout.
    ///
    /// The leap day (Feb 29) has its own slot, [`LEAP_DAY_OF_YEAR`], so
    /// that every other date keeps the same value across years.
    pub fn day_of_year(&self) -> u32 {
        if self.month == 2 && self.day == 29 {
            return LEAP_DAY_OF_YEAR;
        }
        DAYS_BEFORE_MONTH[(self.month - 1) as usize] + self.day - 1
    }

    pub fn add_days(&self, days: i64) -> Self {
        Self::from_julian_day(self.jday + days)
    }

    /// Signed number of days from `other` to `self`.
    pub fn days_since(&self, other: &JDate) -> i64 {
        self.jday - other.jday
    }

    /// Returns `(year, month, day)` on the Gregorian calendar.
    pub fn to_gregorian(&self) -> (i32, u32, u32) {
        ymd_from_julian_day(self.jday, false)
    }

    /// Sunrise and sunset local times at the given location.
    ///
    /// Eastern longitudes and northern latitudes are positive.
    pub fn sunrise_sunset(
        &self,
        longitude: f64,
        latitude: f64,
        observation: Observation,
        tz_offset_hours: f64,
    ) -> (HourMinute, HourMinute) {
        sunrise_sunset(self.jday, longitude, latitude, observation, tz_offset_hours)
    }
}

impl Display for JDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

fn is_leap_year(year: i32, julian: bool) -> bool {
    if julian {
        year.rem_euclid(4) == 0
    } else {
        (year.rem_euclid(4) == 0 && year.rem_euclid(100) != 0) || year.rem_euclid(400) == 0
    }
}

fn days_in_month(year: i32, month: u32, julian: bool) -> u32 {
    match month {
        2 if is_leap_year(year, julian) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn validate_ymd(year: i32, month: u32, day: u32, julian: bool) -> DateResult<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(DateError::UnsupportedYear(year));
    }
    if !(1..=12).contains(&month) {
        return Err(DateError::InvalidMonth(month));
    }
    if day < 1 || day > days_in_month(year, month, julian) {
        return Err(DateError::InvalidDay { year, month, day });
    }
    Ok(())
}

fn julian_day_number(year: i32, month: u32, day: u32, julian: bool) -> i64 {
    let (year, month, day) = (i64::from(year), i64::from(month), i64::from(day));
    let a = (14 - month) / 12;
    let y = year + 4800 - a;
    let m = month + 12 * a - 3;

    let mut jday = day + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - 32083;
    if !julian {
        jday += y.div_euclid(400) - y.div_euclid(100) + 38;
    }
    jday
}

fn ymd_from_julian_day(jday: i64, julian: bool) -> (i32, u32, u32) {
    let mut f = jday + 1401;
    if !julian {
        f += ((4 * jday + 274277).div_euclid(146097) * 3).div_euclid(4) - 38;
    }
    let e = 4 * f + 3;
    let g = e.rem_euclid(1461).div_euclid(4);
    let h = 5 * g + 2;

    let day = h.rem_euclid(153).div_euclid(5) + 1;
    let month = (h.div_euclid(153) + 2).rem_euclid(12) + 1;
    let year = e.div_euclid(1461) - 4716 + (14 - month).div_euclid(12);

    (year as i32, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn julian_day_number_matches_known_value() {
        let date = JDate::new(1948, 2, 1).unwrap();
        assert_eq!(date.julian_day(), 2432596);
    }

    #[test]
    fn leap_rules_differ_between_calendars() {
        assert!(JDate::new(1900, 2, 29).is_ok());
        assert_eq!(
            JDate::from_gregorian(1900, 2, 29).unwrap_err(),
            DateError::InvalidDay {
                year: 1900,
                month: 2,
                day: 29
            }
        );
    }

    #[test]
    fn extreme_years_are_rejected() {
        assert_eq!(
            JDate::new(i32::MAX, 1, 1).unwrap_err(),
            DateError::UnsupportedYear(i32::MAX)
        );
        assert_eq!(
            JDate::from_gregorian(i32::MIN, 1, 1).unwrap_err(),
            DateError::UnsupportedYear(i32::MIN)
        );
        assert!(JDate::new(MAX_YEAR, 12, 31).is_ok());
    }

    #[test]
    fn reform_gap_clamps_to_last_julian_day() {
        let date = JDate::from_gregorian(1582, 10, 10).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (1582, 10, 5));
    }
}
