//! Iqama Calculation Engine.
//!
//! Athan times are moved into the standard-time frame of their day, the
//! rule is applied there (per day, or once per week on the most
//! restrictive reference), and each result is moved back with its own day's DST state.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use log::debug;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use miqat_astronomy::PrayerTimes;
use miqat_types::{MiqatError, Prayer};

use crate::normalize::{clock_minutes, to_clock, CivilFrame};
use crate::rules::{IqamaRule, IqamaRules, PrayerIqama};

type Week = SmallVec<[usize; 7]>;

/// Athan times of one civil date, as wall-clock values.
///
/// Isha or Maghrib may fall after midnight, hence full date-times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AthanDay {
    pub date: NaiveDate,
    pub frame: CivilFrame,
    pub fajr: Option<NaiveDateTime>,
    pub sunrise: Option<NaiveDateTime>,
    pub dhuhr: Option<NaiveDateTime>,
    pub asr: Option<NaiveDateTime>,
    pub maghrib: Option<NaiveDateTime>,
    pub isha: Option<NaiveDateTime>,
}

impl AthanDay {
    /// A day without any Athan set.
    pub fn new(date: NaiveDate, frame: CivilFrame) -> Self {
        Self {
            date,
            frame,
            fajr: None,
            sunrise: None,
            dhuhr: None,
            asr: None,
            maghrib: None,
            isha: None,
        }
    }

    /// Sets one time from a clock value on `date` itself.
    pub fn at(self, prayer: Prayer, time: NaiveTime) -> Self {
        let wall = self.date.and_time(time);
        self.with(prayer, wall)
    }

    /// Sets one time. Prayers other than the five and sunrise are ignored.
    pub fn with(mut self, prayer: Prayer, wall: NaiveDateTime) -> Self {
        match prayer {
            Prayer::Fajr => self.fajr = Some(wall),
            Prayer::Sunrise => self.sunrise = Some(wall),
            Prayer::Dhuhr => self.dhuhr = Some(wall),
            Prayer::Asr => self.asr = Some(wall),
            Prayer::Maghrib => self.maghrib = Some(wall),
            Prayer::Isha => self.isha = Some(wall),
            _ => {}
        }
        self
    }

    pub fn get(&self, prayer: Prayer) -> Option<NaiveDateTime> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
            _ => None,
        }
    }

    /// Standard minutes of one time, if it occurs.
    fn standard(&self, prayer: Prayer) -> Option<i64> {
        self.get(prayer).map(|wall| self.frame.normalize(self.date, wall))
    }
}

impl From<&PrayerTimes> for AthanDay {
    fn from(times: &PrayerTimes) -> Self {
        let frame = CivilFrame::for_date(times.timezone, times.date);
        let mut day = AthanDay::new(times.date, frame);
        for prayer in [Prayer::Fajr, Prayer::Sunrise, Prayer::Dhuhr, Prayer::Asr, Prayer::Maghrib, Prayer::Isha] {
            if let Some(dt) = times.get(prayer) {
                day = day.with(prayer, dt.naive_local());
            }
        }
        day
    }
}

/// Congregation times of one civil date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IqamaDay {
    pub date: NaiveDate,
    pub fajr: Option<NaiveTime>,
    pub dhuhr: Option<NaiveTime>,
    pub asr: Option<NaiveTime>,
    pub maghrib: Option<NaiveTime>,
    pub isha: Option<NaiveTime>,
}

impl IqamaDay {
    fn new(date: NaiveDate) -> Self {
        Self { date, fajr: None, dhuhr: None, asr: None, maghrib: None, isha: None }
    }

    pub fn get(&self, prayer: Prayer) -> Option<NaiveTime> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
            _ => None,
        }
    }

    fn set(&mut self, prayer: Prayer, time: Option<NaiveTime>) {
        match prayer {
            Prayer::Fajr => self.fajr = time,
            Prayer::Dhuhr => self.dhuhr = time,
            Prayer::Asr => self.asr = time,
            Prayer::Maghrib => self.maghrib = time,
            Prayer::Isha => self.isha = time,
            _ => {}
        }
    }
}

/// Computes Iqama times for consecutive days.
///
/// With `weekly` set, days are grouped into weeks starting on
/// `rules.week_start` and each prayer uses the latest Athan of its week (the
/// earliest sunrise for before-sunrise rules), so the Iqama is constant in
/// standard time across the week. Days must be in
/// strictly ascending date order. A missing Athan gives `None` for that
/// prayer on that day.
pub fn compute_iqama_times(
    days: &[AthanDay],
    rules: &IqamaRules,
    weekly: bool,
) -> Result<Vec<IqamaDay>, MiqatError> {
    rules.validate()?;
    if let Some(pair) = days.windows(2).find(|w| w[0].date >= w[1].date) {
        return Err(MiqatError::validation(format!(
            "Athan days must be in ascending order, {} is followed by {}",
            pair[0].date, pair[1].date
        )));
    }

    let groups = if weekly {
        group_by_week(days, rules.week_start)
    } else {
        (0..days.len()).map(|i| Week::from_slice(&[i])).collect()
    };

    let mut out: Vec<IqamaDay> = days.iter().map(|d| IqamaDay::new(d.date)).collect();
    for prayer in Prayer::FIVE {
        let Some(settings) = rules.get(prayer) else { continue };
        for group in &groups {
            for (idx, time) in evaluate(prayer, settings, days, group) {
                out[idx].set(prayer, time);
            }
        }
    }
    Ok(out)
}

/// Splits indices into runs sharing the same week start date.
fn group_by_week(days: &[AthanDay], week_start: Weekday) -> Vec<Week> {
    let mut groups: Vec<Week> = Vec::new();
    let mut current: Option<NaiveDate> = None;
    for (idx, day) in days.iter().enumerate() {
        let key = start_of_week(day.date, week_start);
        match groups.last_mut() {
            Some(group) if current == Some(key) => group.push(idx),
            _ => {
                groups.push(Week::from_slice(&[idx]));
                current = Some(key);
            }
        }
    }
    groups
}

fn start_of_week(date: NaiveDate, week_start: Weekday) -> NaiveDate {
    let back = (7 + date.weekday().num_days_from_monday() - week_start.num_days_from_monday()) % 7;
    date - chrono::Duration::days(back as i64)
}

fn round_up(minutes: i64, interval: Option<u32>) -> i64 {
    match interval {
        Some(i) if i > 1 => {
            let i = i as i64;
            (minutes + i - 1).div_euclid(i) * i
        }
        _ => minutes,
    }
}

fn round_down(minutes: i64, interval: Option<u32>) -> i64 {
    match interval {
        Some(i) if i > 1 => {
            let i = i as i64;
            minutes.div_euclid(i) * i
        }
        _ => minutes,
    }
}

/// Applies one prayer's rule to a group of days.
fn evaluate(
    prayer: Prayer,
    settings: &PrayerIqama,
    days: &[AthanDay],
    group: &Week,
) -> SmallVec<[(usize, Option<NaiveTime>); 7]> {
    let mut out = SmallVec::new();

    // Standard minutes shared by the group, or literal wall-clock minutes per
    // day for the fixed-time rule.
    let shared = match settings.rule {
        IqamaRule::AfterAthan { minutes } => group
            .iter()
            .filter_map(|&i| days[i].standard(prayer))
            .max()
            .map(|latest| round_up(latest, settings.rounding) + minutes),
        IqamaRule::BeforeSunrise { minutes } => group
            .iter()
            .filter_map(|&i| days[i].standard(Prayer::Sunrise))
            .min()
            .map(|earliest| {
                let target = round_down(earliest, settings.rounding) - minutes;
                let latest_athan = group.iter().filter_map(|&i| days[i].standard(prayer)).max();
                match latest_athan {
                    Some(athan) if athan > target => {
                        debug!(
                            "{} Iqama {} min before sunrise precedes the Athan, using the Athan",
                            prayer, minutes
                        );
                        athan
                    }
                    _ => target,
                }
            }),
        IqamaRule::FixedTime { .. } => None,
    };

    for &idx in group {
        let day = &days[idx];
        let wall = match settings.rule {
            IqamaRule::FixedTime { standard, dst } => {
                Some(clock_minutes(if day.frame.observes_dst() { dst } else { standard }))
            }
            IqamaRule::AfterAthan { .. } => shared
                .filter(|_| day.get(prayer).is_some())
                .map(|s| day.frame.denormalize(s)),
            IqamaRule::BeforeSunrise { .. } => shared
                .filter(|_| day.get(Prayer::Sunrise).is_some())
                .map(|s| day.frame.denormalize(s)),
        };
        out.push((idx, wall.map(|w| clamp(prayer, day.date, w, settings))));
    }
    out
}

/// Bounds a wall-clock value by the configured literals.
fn clamp(prayer: Prayer, date: NaiveDate, wall: i64, settings: &PrayerIqama) -> NaiveTime {
    if let Some(min) = settings.min {
        if wall < clock_minutes(min) {
            debug!("{} Iqama on {} raised to {}", prayer, date, min);
            return min;
        }
    }
    if let Some(max) = settings.max {
        if wall > clock_minutes(max) {
            debug!("{} Iqama on {} lowered to {}", prayer, date, max);
            return max;
        }
    }
    to_clock(wall)
}
