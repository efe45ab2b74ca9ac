//! Error type shared by every miqat crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from miqat operations.
///
/// Astronomically impossible events (the sun never reaching an angle) are
/// not errors; they surface as missing times instead.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum MiqatError {
    /// An input value is outside its valid range.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// No calculation method is registered under this name.
    #[error("Unknown calculation method '{name}'")]
    UnknownMethod { name: String },

    /// The IANA timezone identifier could not be resolved.
    #[error("Unknown timezone '{name}'")]
    InvalidTimeZone { name: String },

    /// Date cannot be converted (e.g. before the Hijri epoch).
    #[error("Date {date} is out of supported range (earliest {min})")]
    DateOutOfRange { date: NaiveDate, min: NaiveDate },

    /// Configuration is internally inconsistent.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl MiqatError {
    /// Creates a `ValidationError`.
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::ValidationError(reason.into())
    }

    /// Creates an `InvalidConfiguration` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }

    /// Creates an `UnknownMethod` error.
    pub fn unknown_method(name: impl Into<String>) -> Self {
        Self::UnknownMethod { name: name.into() }
    }

    /// Creates an `InvalidTimeZone` error.
    pub fn invalid_timezone(name: impl Into<String>) -> Self {
        Self::InvalidTimeZone { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = MiqatError::unknown_method("Foo");
        assert_eq!(e.to_string(), "Unknown calculation method 'Foo'");

        let e = MiqatError::invalid_timezone("Mars/Olympus");
        assert_eq!(e.to_string(), "Unknown timezone 'Mars/Olympus'");
    }

    #[test]
    fn test_error_serde_roundtrip() {
        let e = MiqatError::invalid_config("min after max");
        let json = serde_json::to_string(&e).unwrap();
        let back: MiqatError = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
