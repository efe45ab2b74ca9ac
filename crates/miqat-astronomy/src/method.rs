//! Calculation method presets.
//!
//! Each convention fixes the solar depression used for Fajr and Isha (or a
//! minute offset for Isha), how Maghrib follows sunset and how midnight is
//! defined. Presets live in an immutable static table and are looked up by
//! name once, when a configuration is built.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use miqat_types::MiqatError;

/// Either a solar depression angle or a fixed delay after a reference event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Offset {
    /// Degrees below the horizon.
    Angle(f64),
    /// Minutes after the reference event (sunset for Maghrib, Maghrib for Isha).
    Minutes(f64),
}

impl Offset {
    /// The depression angle, if this offset is angle based.
    pub fn angle(self) -> Option<f64> {
        match self {
            Offset::Angle(a) => Some(a),
            Offset::Minutes(_) => None,
        }
    }
}

/// Definition of the middle of the night.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MidnightMode {
    /// Halfway between sunset and sunrise.
    #[default]
    Standard,
    /// Halfway between sunset and the next Fajr.
    Jafari,
}

/// Shadow length rule for the start of Asr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum AsrFactor {
    /// Shadow equals object length (Shafi'i, Maliki, Hanbali).
    #[default]
    Standard,
    /// Shadow twice the object length.
    Hanafi,
    /// Arbitrary factor.
    Factor(f64),
}

impl AsrFactor {
    pub fn shadow_length(self) -> f64 {
        match self {
            AsrFactor::Standard => 1.0,
            AsrFactor::Hanafi => 2.0,
            AsrFactor::Factor(f) => f,
        }
    }
}

/// Fallback used when Fajr/Isha are unreachable or too far into the night.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HighLatitudeRule {
    /// Use the literal solution, even if missing.
    None,
    /// At most half of the night.
    NightMiddle,
    /// At most a seventh of the night.
    OneSeventh,
    /// At most `angle / 60` of the night.
    #[default]
    AngleBased,
}

impl HighLatitudeRule {
    /// Fraction of the night allowed between the event and its base
    /// (sunrise or sunset). `None` for [`HighLatitudeRule::None`].
    pub fn portion(self, angle: f64) -> Option<f64> {
        match self {
            HighLatitudeRule::None => None,
            HighLatitudeRule::NightMiddle => Some(0.5),
            HighLatitudeRule::OneSeventh => Some(1.0 / 7.0),
            HighLatitudeRule::AngleBased => Some(angle / 60.0),
        }
    }
}

/// Registered calculation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MethodId {
    Mwl,
    Isna,
    Egypt,
    Makkah,
    Karachi,
    Tehran,
    Jafari,
    Gulf,
    Kuwait,
    Qatar,
    Singapore,
    France,
    Turkey,
    Russia,
    Dubai,
    Jakim,
    Tunisia,
    Algeria,
    Kemenag,
    Morocco,
    Portugal,
    Jordan,
    Custom,
}

impl MethodId {
    /// Registry key, e.g. `"ISNA"`.
    pub fn as_str(self) -> &'static str {
        match self {
            MethodId::Mwl => "MWL",
            MethodId::Isna => "ISNA",
            MethodId::Egypt => "EGYPT",
            MethodId::Makkah => "MAKKAH",
            MethodId::Karachi => "KARACHI",
            MethodId::Tehran => "TEHRAN",
            MethodId::Jafari => "JAFARI",
            MethodId::Gulf => "GULF",
            MethodId::Kuwait => "KUWAIT",
            MethodId::Qatar => "QATAR",
            MethodId::Singapore => "SINGAPORE",
            MethodId::France => "FRANCE",
            MethodId::Turkey => "TURKEY",
            MethodId::Russia => "RUSSIA",
            MethodId::Dubai => "DUBAI",
            MethodId::Jakim => "JAKIM",
            MethodId::Tunisia => "TUNISIA",
            MethodId::Algeria => "ALGERIA",
            MethodId::Kemenag => "KEMENAG",
            MethodId::Morocco => "MOROCCO",
            MethodId::Portugal => "PORTUGAL",
            MethodId::Jordan => "JORDAN",
            MethodId::Custom => "CUSTOM",
        }
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MethodId {
    type Err = MiqatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        if key.eq_ignore_ascii_case(MethodId::Custom.as_str()) {
            return Ok(MethodId::Custom);
        }
        METHODS
            .iter()
            .map(|m| m.id)
            .find(|id| id.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| MiqatError::unknown_method(key))
    }
}

/// A calculation convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub id: MethodId,
    /// Fajr depression in degrees.
    pub fajr: f64,
    pub isha: Offset,
    pub maghrib: Offset,
    pub midnight: MidnightMode,
    pub asr: AsrFactor,
    /// Minutes added to solar noon for Dhuhr.
    pub dhuhr_minutes: f64,
}

/// Maghrib one minute after sunset unless a method says otherwise.
const MAGHRIB_DEFAULT: Offset = Offset::Minutes(1.0);

const fn preset(id: MethodId, fajr: f64, isha: Offset) -> Method {
    Method {
        id,
        fajr,
        isha,
        maghrib: MAGHRIB_DEFAULT,
        midnight: MidnightMode::Standard,
        asr: AsrFactor::Standard,
        dhuhr_minutes: 0.0,
    }
}

const fn jafari_preset(id: MethodId, fajr: f64, isha: f64, maghrib: f64) -> Method {
    Method {
        id,
        fajr,
        isha: Offset::Angle(isha),
        maghrib: Offset::Angle(maghrib),
        midnight: MidnightMode::Jafari,
        asr: AsrFactor::Standard,
        dhuhr_minutes: 0.0,
    }
}

const fn with_maghrib(mut m: Method, minutes: f64) -> Method {
    m.maghrib = Offset::Minutes(minutes);
    m
}

/// Preset table, immutable for the life of the process.
pub static METHODS: [Method; 22] = [
    preset(MethodId::Mwl, 18.0, Offset::Angle(17.0)),
    preset(MethodId::Isna, 15.0, Offset::Angle(15.0)),
    preset(MethodId::Egypt, 19.5, Offset::Angle(17.5)),
    preset(MethodId::Makkah, 18.5, Offset::Minutes(90.0)),
    preset(MethodId::Karachi, 18.0, Offset::Angle(18.0)),
    jafari_preset(MethodId::Tehran, 17.7, 14.0, 4.5),
    jafari_preset(MethodId::Jafari, 16.0, 14.0, 4.0),
    preset(MethodId::Gulf, 19.5, Offset::Minutes(90.0)),
    preset(MethodId::Kuwait, 18.0, Offset::Angle(17.5)),
    preset(MethodId::Qatar, 18.0, Offset::Minutes(90.0)),
    preset(MethodId::Singapore, 20.0, Offset::Angle(18.0)),
    preset(MethodId::France, 12.0, Offset::Angle(12.0)),
    preset(MethodId::Turkey, 18.0, Offset::Angle(17.0)),
    preset(MethodId::Russia, 16.0, Offset::Angle(15.0)),
    preset(MethodId::Dubai, 18.2, Offset::Angle(18.2)),
    preset(MethodId::Jakim, 20.0, Offset::Angle(18.0)),
    preset(MethodId::Tunisia, 18.0, Offset::Angle(18.0)),
    preset(MethodId::Algeria, 18.0, Offset::Angle(17.0)),
    preset(MethodId::Kemenag, 20.0, Offset::Angle(18.0)),
    preset(MethodId::Morocco, 19.0, Offset::Angle(17.0)),
    with_maghrib(preset(MethodId::Portugal, 18.0, Offset::Minutes(77.0)), 3.0),
    with_maghrib(preset(MethodId::Jordan, 18.0, Offset::Angle(18.0)), 5.0),
];

impl Method {
    /// Preset for a registered id. `MethodId::Custom` yields MWL angles
    /// tagged as custom.
    pub fn get(id: MethodId) -> Method {
        match METHODS.iter().find(|m| m.id == id) {
            Some(m) => *m,
            None => Method { id: MethodId::Custom, ..METHODS[0] },
        }
    }

    /// Looks a preset up by registry key (case-insensitive).
    pub fn lookup(name: &str) -> Result<Method, MiqatError> {
        name.parse::<MethodId>().map(Method::get)
    }

    /// All registered presets.
    pub fn all() -> &'static [Method] {
        &METHODS
    }

    /// A user-defined convention with Maghrib one minute after sunset.
    pub fn custom(fajr: f64, isha: Offset) -> Method {
        preset(MethodId::Custom, fajr, isha)
    }

    pub fn with_maghrib(mut self, maghrib: Offset) -> Self {
        self.maghrib = maghrib;
        self
    }

    pub fn with_midnight(mut self, midnight: MidnightMode) -> Self {
        self.midnight = midnight;
        self
    }

    pub fn with_asr(mut self, asr: AsrFactor) -> Self {
        self.asr = asr;
        self
    }

    pub fn with_dhuhr_minutes(mut self, minutes: f64) -> Self {
        self.dhuhr_minutes = minutes;
        self
    }

    /// Checks that angles and offsets are physically meaningful.
    pub fn validate(&self) -> Result<(), MiqatError> {
        let angle_ok = |a: f64| a.is_finite() && a > 0.0 && a < 90.0;
        let minutes_ok = |m: f64| m.is_finite() && (0.0..=720.0).contains(&m);

        if !angle_ok(self.fajr) {
            return Err(MiqatError::invalid_config(format!(
                "Fajr angle {} must be within (0, 90) degrees",
                self.fajr
            )));
        }
        for (name, offset) in [("Isha", self.isha), ("Maghrib", self.maghrib)] {
            let ok = match offset {
                Offset::Angle(a) => angle_ok(a),
                Offset::Minutes(m) => minutes_ok(m),
            };
            if !ok {
                return Err(MiqatError::invalid_config(format!(
                    "{} offset {:?} is out of range",
                    name, offset
                )));
            }
        }
        if let AsrFactor::Factor(f) = self.asr {
            if !f.is_finite() || f <= 0.0 {
                return Err(MiqatError::invalid_config(format!(
                    "Asr shadow factor {} must be positive",
                    f
                )));
            }
        }
        if !self.dhuhr_minutes.is_finite() || self.dhuhr_minutes.abs() > 60.0 {
            return Err(MiqatError::invalid_config(format!(
                "Dhuhr offset {} minutes is out of range",
                self.dhuhr_minutes
            )));
        }
        Ok(())
    }
}

impl Default for Method {
    fn default() -> Self {
        Method::get(MethodId::Mwl)
    }
}
