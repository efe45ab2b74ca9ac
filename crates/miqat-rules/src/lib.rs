//! Iqama rules engine for miqat.
//!
//! Derives congregation start times from computed Athan times: per-prayer
//! offset rules, rounding, clamps and weekly uniform schedules. All
//! comparisons happen in a DST-free frame (see [`normalize`]).

pub mod normalize;
pub mod rules;
pub mod engine;

pub use engine::{compute_iqama_times, AthanDay, IqamaDay};
pub use normalize::CivilFrame;
pub use rules::{IqamaRule, IqamaRules, IqamaRulesBuilder, PrayerIqama};
