//! Iqama rule configuration.

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use miqat_types::{MiqatError, Prayer};

/// How one prayer's Iqama is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IqamaRule {
    /// Athan plus `minutes`.
    AfterAthan { minutes: i64 },
    /// Sunrise minus `minutes` (Fajr only).
    BeforeSunrise { minutes: i64 },
    /// Literal clock times for standard-time days and DST days (Dhuhr, Asr).
    FixedTime { standard: NaiveTime, dst: NaiveTime },
}

/// Rule, rounding and bounds for one prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerIqama {
    pub rule: IqamaRule,
    /// Interval in minutes the reference time is rounded to. Up for
    /// after-Athan rules, down for before-sunrise rules.
    #[serde(default)]
    pub rounding: Option<u32>,
    /// Earliest allowed wall-clock Iqama.
    #[serde(default)]
    pub min: Option<NaiveTime>,
    /// Latest allowed wall-clock Iqama.
    #[serde(default)]
    pub max: Option<NaiveTime>,
}

impl PrayerIqama {
    pub fn after_athan(minutes: i64) -> Self {
        Self::from_rule(IqamaRule::AfterAthan { minutes })
    }

    pub fn before_sunrise(minutes: i64) -> Self {
        Self::from_rule(IqamaRule::BeforeSunrise { minutes })
    }

    pub fn fixed(standard: NaiveTime, dst: NaiveTime) -> Self {
        Self::from_rule(IqamaRule::FixedTime { standard, dst })
    }

    fn from_rule(rule: IqamaRule) -> Self {
        Self { rule, rounding: None, min: None, max: None }
    }

    pub fn rounded(mut self, interval: u32) -> Self {
        self.rounding = Some(interval);
        self
    }

    pub fn between(mut self, min: NaiveTime, max: NaiveTime) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    fn validate(&self, prayer: Prayer) -> Result<(), MiqatError> {
        let allowed = match (prayer, self.rule) {
            (_, IqamaRule::AfterAthan { .. }) => true,
            (Prayer::Fajr, IqamaRule::BeforeSunrise { .. }) => true,
            (Prayer::Dhuhr | Prayer::Asr, IqamaRule::FixedTime { .. }) => true,
            _ => false,
        };
        if !allowed {
            return Err(MiqatError::invalid_config(format!(
                "{:?} is not a valid Iqama rule for {}",
                self.rule, prayer
            )));
        }
        if let IqamaRule::AfterAthan { minutes } | IqamaRule::BeforeSunrise { minutes } = self.rule {
            if !(0..=180).contains(&minutes) {
                return Err(MiqatError::invalid_config(format!(
                    "{} Iqama offset {} minutes outside [0, 180]",
                    prayer, minutes
                )));
            }
        }
        if let Some(interval) = self.rounding {
            if interval == 0 || 60 % interval != 0 {
                return Err(MiqatError::invalid_config(format!(
                    "{} rounding interval {} must divide 60",
                    prayer, interval
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(MiqatError::invalid_config(format!(
                    "{} Iqama lower bound {} is after upper bound {}",
                    prayer, min, max
                )));
            }
        }
        Ok(())
    }
}

/// Iqama configuration for the five prayers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IqamaRules {
    pub fajr: PrayerIqama,
    pub dhuhr: PrayerIqama,
    pub asr: PrayerIqama,
    pub maghrib: PrayerIqama,
    pub isha: PrayerIqama,
    /// First day of a weekly schedule. Default: Monday
    #[serde(default = "default_week_start")]
    pub week_start: Weekday,
}

fn default_week_start() -> Weekday {
    Weekday::Mon
}

impl Default for IqamaRules {
    fn default() -> Self {
        Self {
            fajr: PrayerIqama::after_athan(20),
            dhuhr: PrayerIqama::after_athan(15),
            asr: PrayerIqama::after_athan(15),
            maghrib: PrayerIqama::after_athan(5),
            isha: PrayerIqama::after_athan(15),
            week_start: default_week_start(),
        }
    }
}

impl IqamaRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings for one of the five prayers.
    pub fn get(&self, prayer: Prayer) -> Option<&PrayerIqama> {
        match prayer {
            Prayer::Fajr => Some(&self.fajr),
            Prayer::Dhuhr => Some(&self.dhuhr),
            Prayer::Asr => Some(&self.asr),
            Prayer::Maghrib => Some(&self.maghrib),
            Prayer::Isha => Some(&self.isha),
            _ => None,
        }
    }

    pub fn validate(&self) -> Result<(), MiqatError> {
        for prayer in Prayer::FIVE {
            if let Some(p) = self.get(prayer) {
                p.validate(prayer)?;
            }
        }
        Ok(())
    }
}

/// Builder with validation for `IqamaRules`.
#[derive(Debug, Default)]
pub struct IqamaRulesBuilder {
    rules: IqamaRules,
}

impl IqamaRulesBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn fajr(mut self, p: PrayerIqama) -> Self { self.rules.fajr = p; self }
    pub fn dhuhr(mut self, p: PrayerIqama) -> Self { self.rules.dhuhr = p; self }
    pub fn asr(mut self, p: PrayerIqama) -> Self { self.rules.asr = p; self }
    pub fn maghrib(mut self, minutes: i64) -> Self { self.rules.maghrib = PrayerIqama::after_athan(minutes); self }
    pub fn isha(mut self, p: PrayerIqama) -> Self { self.rules.isha = p; self }
    pub fn week_start(mut self, day: Weekday) -> Self { self.rules.week_start = day; self }

    /// Builds and validates.
    pub fn build(self) -> Result<IqamaRules, MiqatError> {
        self.rules.validate()?;
        Ok(self.rules)
    }
}
