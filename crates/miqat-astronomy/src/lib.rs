//! Prayer time calculations for miqat.
//!
//! Low-precision solar ephemeris, hour-angle solving, calculation method
//! presets and the daily prayer time pipeline.

pub mod trig;
pub mod sun;
pub mod solver;
pub mod method;
pub mod config;
pub mod format;
pub mod prayer;

pub use config::{ImsakRule, PrayerConfig, PrayerConfigBuilder, Rounding, Tune};
pub use format::{FormattedTime, TimeFormat, INVALID_TIME};
pub use method::{AsrFactor, HighLatitudeRule, Method, MethodId, MidnightMode, Offset};
pub use prayer::{compute_prayer_times, compute_range, PrayerTimes};
