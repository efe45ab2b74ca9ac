//! # Miqat
//!
//! Islamic prayer times with high-latitude handling, Iqama (congregation)
//! schedules and Hijri dates.
//!
//! This crate is a facade that re-exports functionality from the `miqat` ecosystem.
//!
//! ## Modules
//!
//! - `types`: Core types (Location, Prayer, MiqatError)
//! - `astronomy`: Sun position, calculation methods, prayer time engine
//! - `rules`: Iqama rules engine
//! - `calendar`: Hijri calendar conversion
//!
//! ## Usage
//!
//! ```rust
//! use miqat::prelude::*;
//! use chrono::NaiveDate;
//!
//! let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
//! let redmond = Location::new(47.7580361, -122.1985255, "America/Los_Angeles").unwrap();
//! let times = date.prayer_times(&redmond, &PrayerConfig::for_method(MethodId::Isna)).unwrap();
//! println!("{}", times.format_one(Prayer::Fajr, TimeFormat::H12));
//! ```

pub use miqat_core::*;
