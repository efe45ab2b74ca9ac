//! Low-precision solar ephemeris (J2000 era).
//!
//! Accurate to about a minute of time for prayer calculation purposes
//! between 1950 and 2050 and degrades slowly outside.

use chrono::{Datelike, NaiveDate};

use crate::trig::{dasin, datan2, dcos, dsin, fix_angle, fix_hour};

/// Julian day of the J2000.0 epoch, 2000-01-01 12:00 UT.
pub const J2000: f64 = 2_451_545.0;

/// Apparent position of the sun needed by the hour-angle equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Declination in degrees.
    pub declination: f64,
    /// Equation of time in hours.
    pub equation: f64,
    /// Right ascension in hours, `[0, 24)`.
    pub right_ascension: f64,
}

/// Julian day at 0h UT of a Gregorian calendar date.
pub fn julian_day(date: NaiveDate) -> f64 {
    let (mut year, mut month) = (date.year() as f64, date.month() as f64);
    let day = date.day() as f64;
    if month <= 2.0 {
        year -= 1.0;
        month += 12.0;
    }
    let a = (year / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (year + 4716.0)).floor() + (30.6001 * (month + 1.0)).floor() + day + b - 1524.5
}

/// Sun position at Julian day `jd`.
pub fn sun_position(jd: f64) -> SunPosition {
    let d = jd - J2000;
    let g = fix_angle(357.529 + 0.985_600_28 * d);
    let q = fix_angle(280.459 + 0.985_647_36 * d);
    let l = fix_angle(q + 1.915 * dsin(g) + 0.020 * dsin(2.0 * g));
    let e = 23.439 - 0.000_000_36 * d;

    let right_ascension = fix_hour(datan2(dcos(e) * dsin(l), dcos(l)) / 15.0);
    SunPosition {
        declination: dasin(dsin(e) * dsin(l)),
        equation: q / 15.0 - right_ascension,
        right_ascension,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_julian_day_epoch() {
        let d = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert_eq!(julian_day(d) + 0.5, J2000);
    }

    #[test]
    fn test_julian_day_leap_february() {
        let feb29 = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let mar1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(julian_day(mar1) - julian_day(feb29), 1.0);
    }

    #[test]
    fn test_solstice_declination() {
        let jd = julian_day(NaiveDate::from_ymd_opt(2026, 6, 21).unwrap()) + 0.5;
        let pos = sun_position(jd);
        assert!((pos.declination - 23.44).abs() < 0.05, "decl = {}", pos.declination);

        let jd = julian_day(NaiveDate::from_ymd_opt(2026, 12, 21).unwrap()) + 0.5;
        let pos = sun_position(jd);
        assert!((pos.declination + 23.44).abs() < 0.05, "decl = {}", pos.declination);
    }

    #[test]
    fn test_equation_of_time_extremes() {
        // Early November: sun fast by ~16.4 minutes.
        let jd = julian_day(NaiveDate::from_ymd_opt(2026, 11, 3).unwrap()) + 0.5;
        let eqt_min = sun_position(jd).equation * 60.0;
        assert!((eqt_min - 16.4).abs() < 0.5, "eqt = {} min", eqt_min);

        // Mid February: sun slow by ~14.2 minutes.
        let jd = julian_day(NaiveDate::from_ymd_opt(2026, 2, 11).unwrap()) + 0.5;
        let eqt_min = sun_position(jd).equation * 60.0;
        assert!((eqt_min + 14.2).abs() < 0.5, "eqt = {} min", eqt_min);
    }
}
