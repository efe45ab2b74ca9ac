//! Hijri calendar conversion for miqat.
//!
//! Arithmetic (tabular) Islamic civil calendar: a 30 year cycle of
//! 10631 days, reached through the Julian Day Number. Deterministic for
//! every date from 1 Muharram 1 AH onwards, no lookup tables, no caching.

use std::borrow::Cow;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use log::warn;
use serde::{Deserialize, Serialize};

pub use miqat_types::MiqatError;

/// Julian Day Number of 1 Muharram 1 AH (16 July 622, Julian calendar).
pub const HIJRI_EPOCH_JDN: i64 = 1_948_440;

/// Offset accepted by [`to_hijri`], in days.
pub const MAX_OFFSET: i64 = 30;

/// Offset accepted in strict mode (typical moon sighting calibration).
pub const STRICT_MAX_OFFSET: i64 = 2;

const MONTHS_EN: [&str; 12] = [
    "Muharram",
    "Safar",
    "Rabi' al-Awwal",
    "Rabi' al-Thani",
    "Jumada al-Ula",
    "Jumada al-Akhirah",
    "Rajab",
    "Sha'ban",
    "Ramadhan",
    "Shawwal",
    "Dhu al-Qi'dah",
    "Dhu al-Hijjah",
];

const MONTHS_AR: [&str; 12] = [
    "مُحَرَّم",
    "صَفَر",
    "رَبِيع الأَوَّل",
    "رَبِيع الثَّانِي",
    "جُمَادَى الأُولَى",
    "جُمَادَى الآخِرَة",
    "رَجَب",
    "شَعْبَان",
    "رَمَضَان",
    "شَوَّال",
    "ذُو القَعْدَة",
    "ذُو الحِجَّة",
];

/// Language of month names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Arabic,
}

/// A date in the Islamic civil calendar.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HijriDate {
    pub year: i64,
    /// 1 (Muharram) to 12 (Dhu al-Hijjah).
    pub month: u32,
    pub day: u32,
    pub month_name: Cow<'static, str>,
}

impl HijriDate {
    /// E.g. `"1 Ramadhan 1445"`.
    pub fn formatted(&self) -> String {
        format!("{} {} {}", self.day, self.month_name, self.year)
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} AH", self.day, self.month_name, self.year)
    }
}

/// Returns the Hijri month name, `"Unknown"` outside 1..=12.
pub fn get_hijri_month_name(month: u32, language: Language) -> &'static str {
    let table = match language {
        Language::English => &MONTHS_EN,
        Language::Arabic => &MONTHS_AR,
    };
    match month {
        1..=12 => table[month as usize - 1],
        _ => "Unknown",
    }
}

/// Julian Day Number of a calendar date.
///
/// Dates from 15 October 1582 use the Gregorian formula; earlier dates are
/// read as Julian calendar dates, the convention of historical sources.
pub fn julian_day_number(year: i64, month: i64, day: i64) -> i64 {
    let gregorian = (year, month, day) >= (1582, 10, 15);
    if gregorian {
        let a = (month - 14) / 12;
        (1461 * (year + 4800 + a)) / 4 + (367 * (month - 2 - 12 * a)) / 12
            - (3 * ((year + 4900 + a) / 100)) / 4
            + day
            - 32075
    } else {
        367 * year - (7 * (year + 5001 + (month - 9) / 7)) / 4 + (275 * month) / 9 + day + 1_729_777
    }
}

/// Raw (year, month, day) for a JDN on or after the Hijri epoch.
fn civil_from_jdn(jdn: i64) -> (i64, i64, i64) {
    let l = jdn - HIJRI_EPOCH_JDN + 10632;
    let n = (l - 1) / 10631;
    let l = l - 10631 * n + 354;
    let j = ((10985 - l) / 5316) * ((50 * l) / 17719) + (l / 5670) * ((43 * l) / 15238);
    let l = l - ((30 - j) / 15) * ((17719 * j) / 50) - (j / 16) * ((15238 * j) / 43) + 29;
    let month = (24 * l) / 709;
    let day = l - (709 * month) / 24;
    let year = 30 * n + j - 30;
    (year, month, day)
}

/// Converts a Julian Day Number to a Hijri date.
pub fn julian_day_to_hijri(jdn: i64, language: Language) -> Result<HijriDate, MiqatError> {
    if jdn < HIJRI_EPOCH_JDN {
        return Err(MiqatError::validation(format!(
            "Julian day {} precedes the Hijri epoch ({})",
            jdn, HIJRI_EPOCH_JDN
        )));
    }
    let (year, raw_month, day) = civil_from_jdn(jdn);
    if !(1..=12).contains(&raw_month) {
        warn!("tabular month {} for JDN {} clamped into 1..=12", raw_month, jdn);
    }
    let month = raw_month.clamp(1, 12) as u32;

    Ok(HijriDate {
        year,
        month,
        day: day as u32,
        month_name: Cow::Borrowed(get_hijri_month_name(month, language)),
    })
}

/// Earliest Gregorian date accepted by [`to_hijri`]: 1 Muharram 1 AH is
/// 16 July 622 Julian, i.e. the `NaiveDate` 622-07-16 read as Julian.
pub fn min_supported_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(622, 7, 16).unwrap_or(NaiveDate::MIN)
}

/// Converts Gregorian to Hijri with a day offset.
///
/// # Arguments
/// * `date` - Civil date
/// * `offset` - Days added before conversion (moon sighting calibration), `-30..=30`
/// * `language` - Month name language
///
/// # Errors
/// `ValidationError` for an offset out of range, `DateOutOfRange` for dates
/// before the Hijri epoch.
pub fn to_hijri(date: NaiveDate, offset: i64, language: Language) -> Result<HijriDate, MiqatError> {
    if !(-MAX_OFFSET..=MAX_OFFSET).contains(&offset) {
        return Err(MiqatError::validation(format!(
            "Hijri offset {} outside [-{}, {}]",
            offset, MAX_OFFSET, MAX_OFFSET
        )));
    }
    let out_of_range = || MiqatError::DateOutOfRange { date, min: min_supported_date() };
    let shifted = date.checked_add_signed(Duration::days(offset)).ok_or_else(out_of_range)?;

    let jdn = julian_day_number(
        shifted.year() as i64,
        shifted.month() as i64,
        shifted.day() as i64,
    );
    julian_day_to_hijri(jdn, language).map_err(|_| out_of_range())
}

/// Reusable conversion settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HijriContext {
    pub offset: i64,
    pub language: Language,
}

impl HijriContext {
    pub fn new() -> Self { Self::default() }

    /// Clamped to `-MAX_OFFSET..=MAX_OFFSET`.
    pub fn offset(mut self, offset: i64) -> Self {
        self.offset = offset.clamp(-MAX_OFFSET, MAX_OFFSET);
        self
    }

    pub fn language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn convert(&self, date: NaiveDate) -> Result<HijriDate, MiqatError> {
        to_hijri(date, self.offset, self.language)
    }
}

/// Builder with validation for `HijriContext`.
#[derive(Debug, Default)]
pub struct HijriContextBuilder {
    offset: Option<i64>,
    language: Option<Language>,
    strict: bool,
}

impl HijriContextBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn offset(mut self, offset: i64) -> Self { self.offset = Some(offset); self }
    pub fn language(mut self, language: Language) -> Self { self.language = Some(language); self }

    /// Enables strict offset bounds [-2, 2].
    pub fn strict(mut self, strict: bool) -> Self { self.strict = strict; self }

    pub fn build(self) -> Result<HijriContext, MiqatError> {
        let offset = self.offset.unwrap_or(0);
        let limit = if self.strict { STRICT_MAX_OFFSET } else { MAX_OFFSET };
        if offset.abs() > limit {
            return Err(MiqatError::invalid_config(format!(
                "Offset {} outside bounds [-{}, {}]",
                offset, limit, limit
            )));
        }
        Ok(HijriContext { offset, language: self.language.unwrap_or_default() })
    }
}
