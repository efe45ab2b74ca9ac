//! Rendering of computed instants.

use chrono::{DateTime, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker printed for a time the sun never reaches.
pub const INVALID_TIME: &str = "-----";

/// Output representation of a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeFormat {
    /// `"06:24"`
    #[default]
    H24,
    /// `"6:24 AM"`
    H12,
    /// `"6:24"`, 12-hour clock without suffix.
    H12NoSuffix,
    /// Wall-clock hours as a number, e.g. `6.4`.
    Float,
    /// RFC 3339 with the zone offset, e.g. `"2026-01-01T06:24:00-08:00"`.
    Iso8601,
}

/// A formatted time value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormattedTime {
    Text(String),
    Hours(f64),
    /// The event does not happen on this day.
    Invalid,
}

impl FormattedTime {
    pub fn is_valid(&self) -> bool {
        !matches!(self, FormattedTime::Invalid)
    }
}

impl fmt::Display for FormattedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormattedTime::Text(s) => f.write_str(s),
            FormattedTime::Hours(h) => write!(f, "{}", h),
            FormattedTime::Invalid => f.write_str(INVALID_TIME),
        }
    }
}

/// Formats one instant; `None` becomes [`FormattedTime::Invalid`].
pub fn format_time(time: Option<&DateTime<Tz>>, format: TimeFormat) -> FormattedTime {
    let Some(t) = time else {
        return FormattedTime::Invalid;
    };
    match format {
        TimeFormat::H24 => FormattedTime::Text(format!("{:02}:{:02}", t.hour(), t.minute())),
        TimeFormat::H12 | TimeFormat::H12NoSuffix => {
            let (pm, hour) = t.hour12();
            let mut s = format!("{}:{:02}", hour, t.minute());
            if format == TimeFormat::H12 {
                s.push_str(if pm { " PM" } else { " AM" });
            }
            FormattedTime::Text(s)
        }
        TimeFormat::Float => FormattedTime::Hours(
            t.hour() as f64 + t.minute() as f64 / 60.0 + t.second() as f64 / 3600.0,
        ),
        TimeFormat::Iso8601 => FormattedTime::Text(t.to_rfc3339()),
    }
}
