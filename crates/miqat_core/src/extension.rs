//! Extension trait for `NaiveDate`.

use chrono::NaiveDate;

use crate::calendar::{to_hijri, HijriDate, Language};
use crate::rules::AthanDay;
use crate::{compute_prayer_times, Location, MiqatError, PrayerConfig, PrayerTimes};

/// Extends `NaiveDate` with Hijri conversion and prayer time methods.
pub trait MiqatDateExt {
    /// Hijri date with English month names.
    fn hijri(&self, offset: i64) -> Result<HijriDate, MiqatError>;

    fn hijri_in(&self, offset: i64, language: Language) -> Result<HijriDate, MiqatError>;

    /// Prayer times of this date at `location`.
    fn prayer_times(&self, location: &Location, config: &PrayerConfig) -> Result<PrayerTimes, MiqatError>;

    /// Athan times of this date, ready for the Iqama engine.
    fn athan_day(&self, location: &Location, config: &PrayerConfig) -> Result<AthanDay, MiqatError>;

    /// True if this date falls in Ramadhan (month 9).
    fn is_ramadhan(&self, offset: i64) -> Result<bool, MiqatError>;

    /// Finds the next first day of a Hijri month (up to 60 days ahead).
    fn next_hijri_month_start(&self, offset: i64) -> Option<NaiveDate>;
}

impl MiqatDateExt for NaiveDate {
    fn hijri(&self, offset: i64) -> Result<HijriDate, MiqatError> {
        to_hijri(*self, offset, Language::English)
    }

    fn hijri_in(&self, offset: i64, language: Language) -> Result<HijriDate, MiqatError> {
        to_hijri(*self, offset, language)
    }

    fn prayer_times(&self, location: &Location, config: &PrayerConfig) -> Result<PrayerTimes, MiqatError> {
        compute_prayer_times(*self, location, config)
    }

    fn athan_day(&self, location: &Location, config: &PrayerConfig) -> Result<AthanDay, MiqatError> {
        self.prayer_times(location, config).map(|t| AthanDay::from(&t))
    }

    fn is_ramadhan(&self, offset: i64) -> Result<bool, MiqatError> {
        self.hijri(offset).map(|h| h.month == 9)
    }

    fn next_hijri_month_start(&self, offset: i64) -> Option<NaiveDate> {
        let mut d = *self;
        for _ in 0..60 {
            d = d.succ_opt()?;
            match d.hijri(offset) {
                Ok(h) if h.day == 1 => return Some(d),
                Ok(_) => {}
                Err(_) => return None,
            }
        }
        None
    }
}
