//! Prayer Times Calculation Module.
//!
//! Computes the daily times in a fixed sequence of stages, each a pure
//! transform of [`RawTimes`] (hours after local mean midnight):
//!
//! 1. seed with rough guesses,
//! 2. refine by fixed-point iteration on the sun position,
//! 3. bound Fajr/Isha/Maghrib by the high-latitude rule,
//! 4. apply minute based rules (Maghrib after sunset, Isha after Maghrib, Dhuhr offset),
//! 5. midnight and the thirds of the sunset to sunrise night,
//! 6. tune offsets,
//! 7. convert to zoned instants and round to the minute.
//!
//! Midnight depends on the high-latitude stage (Jafari midnight uses the
//! adjusted next-day Fajr), so the order is fixed.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use log::{debug, trace};
use serde::Serialize;

use miqat_types::{Location, MiqatError, Prayer};

use crate::config::{ImsakRule, PrayerConfig, Rounding};
use crate::format::{format_time, FormattedTime, TimeFormat};
use crate::method::{MidnightMode, Offset};
use crate::solver::{rise_set_angle, Direction, Solver};
use crate::sun::julian_day;
use crate::trig::fix_hour;

/// Canonical times in local mean time hours. `None` means the sun does not
/// reach the required position on this day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawTimes {
    pub imsak: Option<f64>,
    pub fajr: Option<f64>,
    pub sunrise: Option<f64>,
    pub dhuhr: Option<f64>,
    pub asr: Option<f64>,
    pub sunset: Option<f64>,
    pub maghrib: Option<f64>,
    pub isha: Option<f64>,
}

impl RawTimes {
    /// Starting estimates for the refinement loop.
    pub fn initial() -> Self {
        Self {
            imsak: Some(5.0),
            fajr: Some(5.0),
            sunrise: Some(6.0),
            dhuhr: Some(12.0),
            asr: Some(13.0),
            sunset: Some(18.0),
            maghrib: Some(18.0),
            isha: Some(18.0),
        }
    }
}

/// Night span used for midnight and its thirds.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Night {
    start: f64,
    length: f64,
}

/// Times of one day, as instants in the location's timezone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrayerTimes {
    pub date: NaiveDate,
    pub timezone: Tz,
    times: [Option<DateTime<Tz>>; 11],
    /// True if any time was replaced by the high-latitude rule.
    pub high_latitude_adjusted: bool,
}

impl PrayerTimes {
    /// Instant of one prayer, `None` if the sun never reaches it.
    pub fn get(&self, prayer: Prayer) -> Option<DateTime<Tz>> {
        self.times[prayer.index()]
    }

    /// All times in output order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, Option<DateTime<Tz>>)> + '_ {
        Prayer::ALL.iter().map(move |p| (*p, self.times[p.index()]))
    }

    /// Renders every time; unreachable ones become the `-----` sentinel.
    pub fn format(&self, format: TimeFormat) -> BTreeMap<Prayer, FormattedTime> {
        Prayer::ALL
            .iter()
            .map(|p| (*p, format_time(self.times[p.index()].as_ref(), format)))
            .collect()
    }

    /// Renders a single time.
    pub fn format_one(&self, prayer: Prayer, format: TimeFormat) -> FormattedTime {
        format_time(self.times[prayer.index()].as_ref(), format)
    }
}

/// One computation: location, configuration and the date being solved.
struct Pipeline<'a> {
    location: &'a Location,
    config: &'a PrayerConfig,
}

impl<'a> Pipeline<'a> {
    fn solver(&self, date: NaiveDate) -> Solver {
        let jdate = julian_day(date) - self.location.lng / (15.0 * 24.0);
        Solver::new(self.location.lat, jdate)
    }

    /// One fixed-point pass: each estimate selects the sun position used to
    /// produce the next estimate.
    fn refine(&self, solver: &Solver, prev: &RawTimes) -> RawTimes {
        let method = &self.config.method;
        let horizon = rise_set_angle(self.location.elevation);
        let angle_at = |angle: f64, t: Option<f64>, dir: Direction| {
            t.and_then(|h| solver.angle_time(angle, h / 24.0, dir))
        };

        RawTimes {
            imsak: match self.config.imsak {
                ImsakRule::Angle(a) => angle_at(a, prev.imsak, Direction::Morning),
                ImsakRule::MinutesBeforeFajr(_) => None,
            },
            fajr: angle_at(method.fajr, prev.fajr, Direction::Morning),
            sunrise: angle_at(horizon, prev.sunrise, Direction::Morning),
            dhuhr: prev.dhuhr.map(|h| solver.mid_day(h / 24.0)),
            asr: prev
                .asr
                .and_then(|h| solver.asr_time(self.config.asr_factor().shadow_length(), h / 24.0)),
            sunset: angle_at(horizon, prev.sunset, Direction::Evening),
            maghrib: match method.maghrib {
                Offset::Angle(a) => angle_at(a, prev.maghrib, Direction::Evening),
                Offset::Minutes(_) => None,
            },
            isha: match method.isha {
                Offset::Angle(a) => angle_at(a, prev.isha, Direction::Evening),
                Offset::Minutes(_) => None,
            },
        }
    }

    /// Replaces angle-based night times that are missing or further from
    /// their base than the rule allows. Returns whether anything changed.
    ///
    /// Without a sunrise or sunset the night collapses onto solar midnight
    /// when the sun stays up, and spans the whole day around solar noon when
    /// it stays down.
    fn adjust_high_latitudes(&self, solver: &Solver, times: &mut RawTimes) -> bool {
        let rule = self.config.high_latitude;
        if rule.portion(0.0).is_none() {
            return false;
        }
        let (sunrise, sunset, night) = match (times.sunrise, times.sunset, times.dhuhr) {
            (Some(sunrise), Some(sunset), _) => (sunrise, sunset, fix_hour(sunrise - sunset)),
            (_, _, Some(noon)) => {
                let horizon = rise_set_angle(self.location.elevation);
                if solver.noon_altitude(noon / 24.0) > -horizon {
                    debug!("high latitude {:?}: no sunset, night centred on solar midnight", rule);
                    (noon - 12.0, noon + 12.0, 0.0)
                } else {
                    debug!("high latitude {:?}: no sunrise, night centred on solar noon", rule);
                    (noon, noon, 24.0)
                }
            }
            _ => return false,
        };
        let method = &self.config.method;
        let mut adjusted = false;

        let mut bound = |time: &mut Option<f64>, base: f64, angle: f64, dir: Direction, name: &str| {
            let Some(portion) = rule.portion(angle).map(|p| p * night) else {
                return;
            };
            let distance = time.map(|t| match dir {
                Direction::Morning => fix_hour(base - t),
                Direction::Evening => fix_hour(t - base),
            });
            if distance.is_none_or(|d| d > portion) {
                let replaced = match dir {
                    Direction::Morning => base - portion,
                    Direction::Evening => base + portion,
                };
                debug!(
                    "high latitude {:?}: {} {:?} -> {:.4}h (night {:.4}h)",
                    rule, name, time, replaced, night
                );
                *time = Some(replaced);
                adjusted = true;
            }
        };

        if let ImsakRule::Angle(a) = self.config.imsak {
            bound(&mut times.imsak, sunrise, a, Direction::Morning, "imsak");
        }
        bound(&mut times.fajr, sunrise, method.fajr, Direction::Morning, "fajr");
        if let Offset::Angle(a) = method.isha {
            bound(&mut times.isha, sunset, a, Direction::Evening, "isha");
        }
        if let Offset::Angle(a) = method.maghrib {
            bound(&mut times.maghrib, sunset, a, Direction::Evening, "maghrib");
        }
        adjusted
    }

    /// Stages 1 to 3 for one date.
    fn solve_angles(&self, date: NaiveDate) -> (RawTimes, bool) {
        let solver = self.solver(date);
        let mut times = RawTimes::initial();
        for pass in 0..self.config.iterations {
            times = self.refine(&solver, &times);
            trace!("{} refine pass {}: {:?}", date, pass + 1, times);
        }
        let adjusted = self.adjust_high_latitudes(&solver, &mut times);
        (times, adjusted)
    }

    /// Stage 4.
    fn apply_offsets(&self, times: &mut RawTimes) {
        let method = &self.config.method;
        if let Offset::Minutes(m) = method.maghrib {
            times.maghrib = times.sunset.map(|s| s + m / 60.0);
        }
        if let Offset::Minutes(m) = method.isha {
            times.isha = times.maghrib.map(|t| t + m / 60.0);
        }
        times.dhuhr = times.dhuhr.map(|t| t + method.dhuhr_minutes / 60.0);
    }

    /// Stage 5: the span from sunset to sunrise, or to the next day's Fajr
    /// in Jafari mode.
    fn night(&self, date: NaiveDate, times: &RawTimes, mode: MidnightMode) -> Option<Night> {
        let sunset = times.sunset?;
        let end = match mode {
            MidnightMode::Standard => times.sunrise?,
            MidnightMode::Jafari => {
                let next = date.succ_opt()?;
                let (next_times, _) = self.solve_angles(next);
                next_times.fajr? + 24.0
            }
        };
        Some(Night { start: sunset, length: fix_hour(end - sunset) })
    }

    /// Stage 7: local mean time hours to a rounded zoned instant.
    fn to_instant(&self, date: NaiveDate, hours: Option<f64>) -> Option<DateTime<Tz>> {
        let hours = hours.filter(|h| h.is_finite())?;
        let utc_midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
        let utc_hours = hours - self.location.lng / 15.0;
        let millis = (utc_hours * 3_600_000.0).round() as i64;
        let instant = utc_midnight.checked_add_signed(Duration::milliseconds(millis))?;
        let rounded = round_to_minute(instant, self.config.rounding)?;
        Some(rounded.with_timezone(&self.location.timezone))
    }

    fn run(&self, date: NaiveDate) -> PrayerTimes {
        let (mut raw, adjusted) = self.solve_angles(date);
        self.apply_offsets(&mut raw);
        let night = self.night(date, &raw, MidnightMode::Standard);
        let midnight_night = match self.config.midnight_mode() {
            MidnightMode::Standard => night,
            MidnightMode::Jafari => self.night(date, &raw, MidnightMode::Jafari),
        };

        let tune = &self.config.tune;
        let tuned = |p: Prayer, t: Option<f64>| t.map(|h| h + tune.hours(p));

        let fajr = tuned(Prayer::Fajr, raw.fajr);
        let imsak = match self.config.imsak {
            ImsakRule::MinutesBeforeFajr(m) => fajr.map(|f| f - m / 60.0),
            ImsakRule::Angle(_) => raw.imsak,
        };
        let midnight = midnight_night.map(|n| n.start + n.length / 2.0);
        // Thirds always divide the sunset to sunrise night.
        let first_third = night.map(|n| n.start + n.length / 3.0);
        let last_third = night.map(|n| n.start + 2.0 * n.length / 3.0);

        let mut hours = [None; 11];
        hours[Prayer::Imsak.index()] = tuned(Prayer::Imsak, imsak);
        hours[Prayer::Fajr.index()] = fajr;
        hours[Prayer::Sunrise.index()] = tuned(Prayer::Sunrise, raw.sunrise);
        hours[Prayer::Dhuhr.index()] = tuned(Prayer::Dhuhr, raw.dhuhr);
        hours[Prayer::Asr.index()] = tuned(Prayer::Asr, raw.asr);
        hours[Prayer::Sunset.index()] = tuned(Prayer::Sunset, raw.sunset);
        hours[Prayer::Maghrib.index()] = tuned(Prayer::Maghrib, raw.maghrib);
        hours[Prayer::Isha.index()] = tuned(Prayer::Isha, raw.isha);
        hours[Prayer::Midnight.index()] = tuned(Prayer::Midnight, midnight);
        hours[Prayer::FirstThird.index()] = tuned(Prayer::FirstThird, first_third);
        hours[Prayer::LastThird.index()] = tuned(Prayer::LastThird, last_third);

        PrayerTimes {
            date,
            timezone: self.location.timezone,
            times: hours.map(|h| self.to_instant(date, h)),
            high_latitude_adjusted: adjusted,
        }
    }
}

fn round_to_minute(instant: DateTime<Utc>, rounding: Rounding) -> Option<DateTime<Utc>> {
    const MINUTE_MS: i64 = 60_000;
    let ms = instant.timestamp_millis();
    let floor = ms - ms.rem_euclid(MINUTE_MS);
    let rounded = match rounding {
        Rounding::Floor => floor,
        Rounding::Ceil if floor == ms => floor,
        Rounding::Ceil => floor + MINUTE_MS,
        Rounding::Nearest if ms - floor >= MINUTE_MS / 2 => floor + MINUTE_MS,
        Rounding::Nearest => floor,
    };
    DateTime::from_timestamp_millis(rounded)
}

/// Calculates prayer times for a given date and location.
///
/// # Arguments
/// * `date` - The Gregorian date
/// * `location` - Coordinates, elevation and timezone
/// * `config` - Method and adjustments
///
/// # Errors
/// Returns `MiqatError` for out-of-range coordinates or an invalid
/// configuration. Days on which the sun never reaches an angle are not
/// errors: the affected times are `None`.
///
/// # Example
/// ```rust
/// use chrono::NaiveDate;
/// use miqat_types::{Location, Prayer};
/// use miqat_astronomy::{compute_prayer_times, HighLatitudeRule, MethodId, PrayerConfig, TimeFormat};
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let redmond = Location::new(47.7580361, -122.1985255, "America/Los_Angeles").unwrap();
/// let config = PrayerConfig::for_method(MethodId::Isna).high_latitude(HighLatitudeRule::AngleBased);
///
/// let times = compute_prayer_times(date, &redmond, &config).unwrap();
/// assert_eq!(times.format_one(Prayer::Fajr, TimeFormat::H24).to_string(), "06:24");
/// ```
pub fn compute_prayer_times(
    date: NaiveDate,
    location: &Location,
    config: &PrayerConfig,
) -> Result<PrayerTimes, MiqatError> {
    location.validate()?;
    config.validate()?;
    Ok(Pipeline { location, config }.run(date))
}

/// Prayer times for every date in `start..=end`.
pub fn compute_range(
    start: NaiveDate,
    end: NaiveDate,
    location: &Location,
    config: &PrayerConfig,
) -> Result<Vec<PrayerTimes>, MiqatError> {
    if start > end {
        return Err(MiqatError::validation(format!(
            "Range start {} is after end {}",
            start, end
        )));
    }
    location.validate()?;
    config.validate()?;
    let pipeline = Pipeline { location, config };
    Ok(start.iter_days().take_while(|d| *d <= end).map(|d| pipeline.run(d)).collect())
}
