//! Sunrise and sunset times for Julian dates.
//!
//! Solar position follows Paul Schlyter's public-domain SUNRISET.C
//! algorithm. Longitudes are positive east, latitudes positive north.

use super::DateError;
use log::info;
use std::f64::consts::PI;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const RAD2DEG: f64 = 180.0 / PI;

/// Julian day number of 1999-12-19 (Julian calendar), the epoch of `d`.
const EPOCH_JULIAN_DAY: f64 = 2451544.0;

/// Sun altitude convention used to decide when the sun rises or sets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Observation {
    /// Upper limb 35 arc minutes below the horizon (refraction included).
    #[default]
    Default,
    /// Sun center 6 degrees below the horizon.
    Civil,
    /// Sun center 12 degrees below the horizon.
    Nautical,
    /// Sun center 15 degrees below the horizon.
    Amateur,
    /// Sun center 18 degrees below the horizon.
    Astronomical,
    Custom { altitude: f64, upper_limb: bool },
}

impl Observation {
    /// Returns `(altitude_degrees, upper_limb)`.
    pub fn parameters(&self) -> (f64, bool) {
        match *self {
            Self::Default => (-35.0 / 60.0, true),
            Self::Civil => (-6.0, false),
            Self::Nautical => (-12.0, false),
            Self::Amateur => (-15.0, false),
            Self::Astronomical => (-18.0, false),
            Self::Custom {
                altitude,
                upper_limb,
            } => (altitude, upper_limb),
        }
    }
}

impl FromStr for Observation {
    type Err = DateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "civil" => Ok(Self::Civil),
            "nautical" => Ok(Self::Nautical),
            "amateur" | "amature" => Ok(Self::Amateur),
            "astronomical" => Ok(Self::Astronomical),
            other => Err(DateError::UnknownObservation(other.to_string())),
        }
    }
}

/// Local wall-clock time, truncated to the minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HourMinute {
    pub hour: u32,
    pub minute: u32,
}

impl HourMinute {
    fn from_hours(mut hours: f64) -> Self {
        while hours < 0.0 {
            hours += 24.0;
        }
        while hours >= 24.0 {
            hours -= 24.0;
        }
        let hour = hours.floor();
        Self {
            hour: hour as u32,
            minute: (60.0 * (hours - hour)).floor() as u32,
        }
    }
}

impl Display for HourMinute {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Sunrise and sunset for a Julian day number, shifted by `tz_offset_hours`.
pub fn sunrise_sunset(
    jday: i64,
    longitude: f64,
    latitude: f64,
    observation: Observation,
    tz_offset_hours: f64,
) -> (HourMinute, HourMinute) {
    let (altitude, upper_limb) = observation.parameters();
    let d = jday as f64 - EPOCH_JULIAN_DAY + 0.5 - longitude / 360.0;
    let (rise, set) = sun_rise_set(d, longitude, latitude, altitude, upper_limb);

    (
        HourMinute::from_hours(rise + tz_offset_hours),
        HourMinute::from_hours(set + tz_offset_hours),
    )
}

/// Rise and set times in hours UT for day `d` (days since the epoch).
fn sun_rise_set(d: f64, longitude: f64, latitude: f64, altitude: f64, upper_limb: bool) -> (f64, f64) {
    let sidereal = revolution(gmst0(d) + 180.0 + longitude);
    let (right_ascension, declination, distance) = sun_ra_dec(d);
    let south = 12.0 - rev180(sidereal - right_ascension) / 15.0;

    let altitude = if upper_limb {
        altitude - 0.2666 / distance
    } else {
        altitude
    };

    let cost = (sind(altitude) - sind(latitude) * sind(declination))
        / (cosd(latitude) * cosd(declination));
    let arc = if cost >= 1.0 {
        info!(
            "event=sun_never_rises module=calendar status=ok latitude={} altitude={}",
            latitude, altitude
        );
        0.0
    } else if cost <= -1.0 {
        info!(
            "event=sun_never_sets module=calendar status=ok latitude={} altitude={}",
            latitude, altitude
        );
        12.0
    } else {
        acosd(cost) / 15.0
    };

    (south - arc, south + arc)
}

/// Greenwich mean sidereal time at 0h UT, in degrees.
fn gmst0(d: f64) -> f64 {
    revolution((180.0 + 356.0470 + 282.9404) + (0.9856002585 + 4.70935E-5) * d)
}

/// Sun's distance and true ecliptic longitude.
fn sun_position(d: f64) -> (f64, f64) {
    let mean_anomaly = revolution(356.0470 + 0.9856002585 * d);
    let perihelion = 282.9404 + 4.70935E-5 * d;
    let eccentricity = 0.016709 - 1.151E-9 * d;

    let eccentric_anomaly = mean_anomaly
        + eccentricity * RAD2DEG * sind(mean_anomaly) * (1.0 + eccentricity * cosd(mean_anomaly));
    let x = cosd(eccentric_anomaly) - eccentricity;
    let y = (1.0 - eccentricity * eccentricity).sqrt() * sind(eccentric_anomaly);

    let distance = (x * x + y * y).sqrt();
    let mut longitude = atan2d(y, x) + perihelion;
    if longitude >= 360.0 {
        longitude -= 360.0;
    }
    (distance, longitude)
}

/// Sun's right ascension, declination and distance.
fn sun_ra_dec(d: f64) -> (f64, f64, f64) {
    let (distance, longitude) = sun_position(d);

    let x = distance * cosd(longitude);
    let y = distance * sind(longitude);
    let obliquity = 23.4393 - 3.563E-7 * d;

    let z = y * sind(obliquity);
    let y = y * cosd(obliquity);

    let right_ascension = atan2d(y, x);
    let declination = atan2d(z, (x * x + y * y).sqrt());
    (right_ascension, declination, distance)
}

fn sind(x: f64) -> f64 {
    (x / RAD2DEG).sin()
}

fn cosd(x: f64) -> f64 {
    (x / RAD2DEG).cos()
}

fn acosd(x: f64) -> f64 {
    x.acos() * RAD2DEG
}

fn atan2d(y: f64, x: f64) -> f64 {
    y.atan2(x) * RAD2DEG
}

/// Reduces an angle to [0, 360).
fn revolution(x: f64) -> f64 {
    x - 360.0 * (x / 360.0).floor()
}

/// Reduces an angle to [-180, 180).
fn rev180(x: f64) -> f64 {
    x - 360.0 * (x / 360.0 + 0.5).floor()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_parses_known_names() {
        assert_eq!("Civil".parse::<Observation>().unwrap(), Observation::Civil);
        assert_eq!("amature".parse::<Observation>().unwrap(), Observation::Amateur);
        assert!("dusk".parse::<Observation>().is_err());
    }

    #[test]
    fn hour_minute_wraps_around_midnight() {
        assert_eq!(HourMinute::from_hours(-1.5).to_string(), "22:30");
        assert_eq!(HourMinute::from_hours(25.25).to_string(), "01:15");
    }
}
