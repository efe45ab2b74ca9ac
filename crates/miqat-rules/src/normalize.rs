//! Conversion between wall-clock time and a DST-free standard-time frame.
//!
//! Intra-day arithmetic (offsets, maxima across a week, clamps) is done on
//! "standard minutes": minutes after local midnight with the day's DST shift
//! removed. Only results are converted back, using the DST state of the day
//! they belong to. A week that spans a DST change therefore keeps a constant
//! standard-time Iqama while its wall-clock value follows the shift.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use chrono_tz::{OffsetComponents, Tz};
use serde::{Deserialize, Serialize};

pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// DST state of one civil date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CivilFrame {
    dst_minutes: i64,
}

impl CivilFrame {
    pub fn new(dst_minutes: i64) -> Self {
        Self { dst_minutes }
    }

    /// DST state at local noon of `date` in `tz`.
    pub fn for_date(tz: Tz, date: NaiveDate) -> Self {
        let dst = date
            .and_hms_opt(12, 0, 0)
            .and_then(|noon| tz.from_local_datetime(&noon).earliest())
            .map(|dt| dt.offset().dst_offset().num_minutes())
            .unwrap_or(0);
        Self::new(dst)
    }

    pub fn dst_minutes(&self) -> i64 {
        self.dst_minutes
    }

    pub fn observes_dst(&self) -> bool {
        self.dst_minutes != 0
    }

    /// Wall-clock minutes after midnight of `date` to standard minutes.
    pub fn normalize(&self, date: NaiveDate, wall: NaiveDateTime) -> i64 {
        civil_minutes(date, wall) - self.dst_minutes
    }

    /// Wall-clock literal of `date` to standard minutes.
    pub fn normalize_time(&self, time: NaiveTime) -> i64 {
        clock_minutes(time) - self.dst_minutes
    }

    /// Standard minutes back to wall-clock minutes after midnight.
    pub fn denormalize(&self, standard: i64) -> i64 {
        standard + self.dst_minutes
    }
}

/// Minutes from midnight of `date` to `wall`; exceeds a day for times
/// that fall after midnight.
pub fn civil_minutes(date: NaiveDate, wall: NaiveDateTime) -> i64 {
    (wall - date.and_time(NaiveTime::MIN)).num_minutes()
}

pub fn clock_minutes(time: NaiveTime) -> i64 {
    time.hour() as i64 * 60 + time.minute() as i64
}

/// Wall-clock minutes to a time of day, wrapping past midnight.
pub fn to_clock(minutes: i64) -> NaiveTime {
    NaiveTime::MIN + Duration::minutes(minutes.rem_euclid(MINUTES_PER_DAY))
}
