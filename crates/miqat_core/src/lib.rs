//! Core logic for miqat: prayer times, Iqama schedules and Hijri dates.
//!
//! Re-exports the component crates under short module names and adds the
//! glue that spans them (timetables with Iqama, the `NaiveDate` extension
//! trait, the `prayer_config!` macro).

pub use miqat_astronomy as astronomy;
pub use miqat_calendar as calendar;
pub use miqat_rules as rules;
pub use miqat_types as types;

pub use chrono_tz::Tz;

pub mod extension;
mod macros;

pub use astronomy::{
    compute_prayer_times, compute_range, AsrFactor, FormattedTime, HighLatitudeRule, ImsakRule,
    Method, MethodId, MidnightMode, Offset, PrayerConfig, PrayerConfigBuilder, PrayerTimes,
    Rounding, TimeFormat, Tune,
};
pub use calendar::{to_hijri, HijriContext, HijriContextBuilder, HijriDate, Language};
pub use extension::MiqatDateExt;
pub use rules::{
    compute_iqama_times, AthanDay, CivilFrame, IqamaDay, IqamaRule, IqamaRules, IqamaRulesBuilder,
    PrayerIqama,
};
pub use types::{Location, MiqatError, Prayer};

pub mod prelude {
    pub use crate::extension::MiqatDateExt;
    pub use crate::types::*;
    pub use crate::{compute_iqama_times, compute_prayer_times, to_hijri};
    pub use crate::{HighLatitudeRule, MethodId, PrayerConfig, TimeFormat};
    pub use crate::{IqamaRules, PrayerIqama};
}

use chrono::NaiveDate;

/// Lazily computes prayer times for consecutive days.
pub struct TimetableIterator {
    current: NaiveDate,
    end: NaiveDate,
    location: Location,
    config: PrayerConfig,
    done: bool,
}

impl Iterator for TimetableIterator {
    type Item = Result<PrayerTimes, MiqatError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.current > self.end {
            return None;
        }
        let date = self.current;
        match self.current.succ_opt() {
            Some(next) => self.current = next,
            None => self.done = true,
        }
        let result = compute_prayer_times(date, &self.location, &self.config);
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

/// Timetable for `start..=end`. Stops after the first error.
pub fn generate_timetable(
    start: NaiveDate,
    end: NaiveDate,
    location: Location,
    config: PrayerConfig,
) -> TimetableIterator {
    TimetableIterator { current: start, end, location, config, done: false }
}

/// Athan and Iqama times of one day.
#[derive(Debug, Clone)]
pub struct DaySchedule {
    pub athan: PrayerTimes,
    pub iqama: IqamaDay,
}

/// Prayer times plus Iqama times for every date in `start..=end`.
pub fn compute_schedule(
    start: NaiveDate,
    end: NaiveDate,
    location: &Location,
    config: &PrayerConfig,
    rules: &IqamaRules,
    weekly: bool,
) -> Result<Vec<DaySchedule>, MiqatError> {
    let athan = compute_range(start, end, location, config)?;
    let days: Vec<AthanDay> = athan.iter().map(AthanDay::from).collect();
    let iqama = compute_iqama_times(&days, rules, weekly)?;
    Ok(athan
        .into_iter()
        .zip(iqama)
        .map(|(athan, iqama)| DaySchedule { athan, iqama })
        .collect())
}
