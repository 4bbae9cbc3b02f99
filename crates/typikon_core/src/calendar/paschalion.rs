//! Paschalion: the date of Pascha and the yearly computus cycles.
//!
//! All dates are on the Julian calendar.

use super::{DateError, DateResult, JDate};
use serde::Serialize;

/// First year with a defined indiction (312 AD is indiction 1's epoch).
const FIRST_INDICTION_YEAR: i32 = 313;

/// Slavonic letters for the Key of Boundaries, indexed by days after March 22.
const BOUNDARY_KEYS: [&str; 35] = [
    "А", "Б", "В", "Г", "Д", "Е", "Ж", "Ѕ", "З", "И", "І", "К", "Л", "М", "Н", "О", "П", "Р", "С",
    "Т", "Ꙋ", "Ф", "Х", "Ѿ", "Ц", "Ч", "Ш", "Щ", "Ъ", "Ы", "Ь", "Ѣ", "Ю", "Ѫ", "Ѧ",
];

/// Pascha-related facts for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paschalion {
    pub pascha: JDate,
    pub indiction: i32,
    pub solar_cycle: i32,
    pub lunar_cycle: i32,
    pub concurrent: i32,
    pub foundation: i32,
    pub epacta: i32,
    pub key_of_boundaries: &'static str,
}

impl Paschalion {
    pub fn for_year(year: i32) -> DateResult<Self> {
        Ok(Self {
            pascha: pascha(year),
            indiction: indiction(year)?,
            solar_cycle: solar_cycle(year),
            lunar_cycle: lunar_cycle(year),
            concurrent: concurrent(year),
            foundation: foundation(year),
            epacta: epacta(year),
            key_of_boundaries: key_of_boundaries(year),
        })
    }
}

/// Julian date of Pascha, by the Gaussian form of the Alexandrian computus.
pub fn pascha(year: i32) -> JDate {
    let a = year.rem_euclid(4);
    let b = year.rem_euclid(7);
    let c = year.rem_euclid(19);
    let d = (19 * c + 15) % 30;
    let e = (2 * a + 4 * b - d + 34) % 7;
    let month = (d + e + 114) / 31;
    let day = (d + e + 114) % 31 + 1;

    // Always between March 22 and April 26.
    JDate::from_trusted_ymd(year, month as u32, day as u32)
}

pub fn indiction(year: i32) -> DateResult<i32> {
    if year < FIRST_INDICTION_YEAR {
        return Err(DateError::YearOutOfRange {
            year,
            minimum: FIRST_INDICTION_YEAR,
        });
    }
    Ok((year - 312 + 14) % 15 + 1)
}

pub fn solar_cycle(year: i32) -> i32 {
    (year + 20 + 27).rem_euclid(28) + 1
}

/// Metonic cycle.
pub fn lunar_cycle(year: i32) -> i32 {
    (year - 2 + 18).rem_euclid(19) + 1
}

/// Concurrent number (1..=7), tied to the Slavonic vrutseleto letters.
pub fn concurrent(year: i32) -> i32 {
    let solar = (year + 20).rem_euclid(28);
    let vrutseleto = solar + solar / 4;
    (vrutseleto + 6) % 7 + 1
}

/// Age of the moon on March 1.
pub fn foundation(year: i32) -> i32 {
    let value = ((year + 1).rem_euclid(19) * 11) % 30;
    if value == 0 {
        29
    } else {
        value
    }
}

/// Number added to the foundation to reach 21 (or 51).
pub fn epacta(year: i32) -> i32 {
    (51 - foundation(year)) % 30
}

pub fn key_of_boundaries(year: i32) -> &'static str {
    let boundary = JDate::from_trusted_ymd(year, 3, 22);
    BOUNDARY_KEYS[pascha(year).days_since(&boundary) as usize]
}
