//! Prayer names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::MiqatError;

/// Every time reported by the engine, in chronological order of a
/// normal mid-latitude day.
///
/// The first eight after `Imsak` are the canonical pipeline times;
/// `Imsak`, `FirstThird` and `LastThird` are derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prayer {
    Imsak,
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Sunset,
    Maghrib,
    Isha,
    Midnight,
    FirstThird,
    LastThird,
}

impl Prayer {
    /// All names, in output order.
    pub const ALL: [Prayer; 11] = [
        Prayer::Imsak,
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Sunset,
        Prayer::Maghrib,
        Prayer::Isha,
        Prayer::Midnight,
        Prayer::FirstThird,
        Prayer::LastThird,
    ];

    /// The five congregational prayers.
    pub const FIVE: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    /// Position in [`Prayer::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Prayer::Imsak => "Imsak",
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Sunset => "Sunset",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
            Prayer::Midnight => "Midnight",
            Prayer::FirstThird => "Firstthird",
            Prayer::LastThird => "Lastthird",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Prayer {
    type Err = MiqatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Prayer::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| MiqatError::validation(format!("Unknown prayer name '{}'", s)))
    }
}
