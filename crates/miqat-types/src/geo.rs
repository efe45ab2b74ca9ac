//! Observer location.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::MiqatError;

/// Geographic position of the observer plus the civil timezone its
/// times are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    /// Elevation above sea level in meters. Default: 0.0
    pub elevation: f64,
    pub timezone: Tz,
}

impl Location {
    /// Creates a new validated location at sea level.
    ///
    /// Returns `Err(MiqatError::ValidationError)` if coordinates are out of range
    /// and `Err(MiqatError::InvalidTimeZone)` if the zone name is unknown.
    pub fn new(lat: f64, lng: f64, timezone: &str) -> Result<Self, MiqatError> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| MiqatError::invalid_timezone(timezone))?;
        Self::with_tz(lat, lng, tz)
    }

    /// Creates a new validated location from an already resolved zone.
    pub fn with_tz(lat: f64, lng: f64, timezone: Tz) -> Result<Self, MiqatError> {
        let loc = Self { lat, lng, elevation: 0.0, timezone };
        loc.validate()?;
        Ok(loc)
    }

    /// Checks the coordinate and elevation ranges.
    pub fn validate(&self) -> Result<(), MiqatError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(MiqatError::validation(format!(
                "Latitude {} out of range [-90, 90]",
                self.lat
            )));
        }
        if !self.lng.is_finite() || !(-180.0..=180.0).contains(&self.lng) {
            return Err(MiqatError::validation(format!(
                "Longitude {} out of range [-180, 180]",
                self.lng
            )));
        }
        if !self.elevation.is_finite() || self.elevation < 0.0 {
            return Err(MiqatError::validation(format!(
                "Elevation {} must be a non-negative number of meters",
                self.elevation
            )));
        }
        Ok(())
    }

    /// Creates a location without validation. Use with trusted inputs only.
    #[inline]
    pub const fn new_unchecked(lat: f64, lng: f64, timezone: Tz) -> Self {
        Self { lat, lng, elevation: 0.0, timezone }
    }

    /// Sets the elevation (meters above sea level).
    ///
    /// Negative or non-finite elevations are rejected.
    pub fn with_elevation(mut self, elevation: f64) -> Result<Self, MiqatError> {
        self.elevation = elevation;
        self.validate()?;
        Ok(self)
    }
}
