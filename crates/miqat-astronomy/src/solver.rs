//! Inverts the hour-angle equation: given a solar altitude, find the
//! local-mean-time hour at which the sun reaches it.

use crate::sun::sun_position;
use crate::trig::{dacos, dacot, dcos, dsin, dtan, fix_hour};

/// Standard refraction plus solar semi-diameter at sea level, degrees.
pub const RISE_SET_ANGLE: f64 = 0.833;

/// Which side of solar noon an event falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Before noon (Fajr, Sunrise).
    Morning,
    /// After noon (Asr, Sunset, Maghrib, Isha).
    Evening,
}

impl Direction {
    #[inline]
    fn sign(self) -> f64 {
        match self {
            Direction::Morning => -1.0,
            Direction::Evening => 1.0,
        }
    }
}

/// Depression of the visible horizon for an elevated observer.
pub fn rise_set_angle(elevation: f64) -> f64 {
    RISE_SET_ANGLE + 0.0347 * elevation.max(0.0).sqrt()
}

/// Hour-angle solver for one observer latitude and day.
#[derive(Debug, Clone, Copy)]
pub struct Solver {
    latitude: f64,
    /// Julian day of local midnight, already corrected for longitude.
    jdate: f64,
}

impl Solver {
    pub fn new(latitude: f64, jdate: f64) -> Self {
        Self { latitude, jdate }
    }

    /// Local solar noon in hours, where `time` is the day fraction estimate.
    pub fn mid_day(&self, time: f64) -> f64 {
        let eqt = sun_position(self.jdate + time).equation;
        fix_hour(12.0 - eqt)
    }

    /// Solar altitude at upper culmination, degrees.
    pub fn noon_altitude(&self, time: f64) -> f64 {
        let decl = sun_position(self.jdate + time).declination;
        90.0 - (self.latitude - decl).abs()
    }

    /// Time at which the sun is `angle` degrees below the horizon.
    ///
    /// Returns `None` when the sun never reaches that depression on this day.
    pub fn angle_time(&self, angle: f64, time: f64, direction: Direction) -> Option<f64> {
        let decl = sun_position(self.jdate + time).declination;
        let noon = self.mid_day(time);
        let cos_h = (-dsin(angle) - dsin(decl) * dsin(self.latitude))
            / (dcos(decl) * dcos(self.latitude));
        if !cos_h.is_finite() || cos_h.abs() > 1.0 {
            return None;
        }
        let t = dacos(cos_h) / 15.0;
        Some(noon + t * direction.sign())
    }

    /// Start of Asr for an object whose shadow is `factor` times its length
    /// plus its noon shadow.
    pub fn asr_time(&self, factor: f64, time: f64) -> Option<f64> {
        let decl = sun_position(self.jdate + time).declination;
        let angle = -dacot(factor + dtan((self.latitude - decl).abs()));
        self.angle_time(angle, time, Direction::Evening)
    }
}
