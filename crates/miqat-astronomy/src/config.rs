//! Prayer time engine configuration.

use serde::{Deserialize, Serialize};

use miqat_types::{MiqatError, Prayer};

use crate::method::{AsrFactor, HighLatitudeRule, Method, MethodId, MidnightMode};

/// Maximum number of refinement passes accepted by the builder.
pub const MAX_ITERATIONS: u8 = 10;

/// How the fractional minute of a computed instant is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rounding {
    #[default]
    Nearest,
    Floor,
    Ceil,
}

/// How Imsak is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ImsakRule {
    /// Fixed number of minutes before Fajr.
    MinutesBeforeFajr(f64),
    /// Solved like Fajr with its own depression angle.
    Angle(f64),
}

impl Default for ImsakRule {
    fn default() -> Self {
        Self::MinutesBeforeFajr(10.0)
    }
}

/// Per-prayer constant shifts in minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Tune {
    minutes: [f64; 11],
}

impl Tune {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the shift for one prayer.
    pub fn set(mut self, prayer: Prayer, minutes: f64) -> Self {
        self.minutes[prayer.index()] = minutes;
        self
    }

    pub fn get(&self, prayer: Prayer) -> f64 {
        self.minutes[prayer.index()]
    }

    /// Shift in hours.
    pub(crate) fn hours(&self, prayer: Prayer) -> f64 {
        self.get(prayer) / 60.0
    }

    fn validate(&self) -> Result<(), MiqatError> {
        for p in Prayer::ALL {
            let m = self.get(p);
            if !m.is_finite() || m.abs() > 180.0 {
                return Err(MiqatError::invalid_config(format!(
                    "Tune offset {} minutes for {} out of range [-180, 180]",
                    m, p
                )));
            }
        }
        Ok(())
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrayerConfig {
    pub method: Method,
    /// Overrides the method's Asr factor.
    pub asr: Option<AsrFactor>,
    pub high_latitude: HighLatitudeRule,
    /// Overrides the method's midnight mode.
    pub midnight: Option<MidnightMode>,
    pub imsak: ImsakRule,
    pub tune: Tune,
    /// Fixed-point refinement passes. Default: 1
    pub iterations: u8,
    pub rounding: Rounding,
}

impl Default for PrayerConfig {
    fn default() -> Self {
        Self {
            method: Method::default(),
            asr: None,
            high_latitude: HighLatitudeRule::default(),
            midnight: None,
            imsak: ImsakRule::default(),
            tune: Tune::default(),
            iterations: 1,
            rounding: Rounding::default(),
        }
    }
}

impl PrayerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a registered method.
    pub fn for_method(id: MethodId) -> Self {
        Self { method: Method::get(id), ..Self::default() }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn asr(mut self, asr: AsrFactor) -> Self {
        self.asr = Some(asr);
        self
    }

    pub fn high_latitude(mut self, rule: HighLatitudeRule) -> Self {
        self.high_latitude = rule;
        self
    }

    pub fn midnight(mut self, mode: MidnightMode) -> Self {
        self.midnight = Some(mode);
        self
    }

    pub fn imsak(mut self, rule: ImsakRule) -> Self {
        self.imsak = rule;
        self
    }

    pub fn tune(mut self, tune: Tune) -> Self {
        self.tune = tune;
        self
    }

    /// Clamped to `1..=MAX_ITERATIONS`.
    pub fn iterations(mut self, iterations: u8) -> Self {
        self.iterations = iterations.clamp(1, MAX_ITERATIONS);
        self
    }

    pub fn rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Asr factor in effect.
    pub fn asr_factor(&self) -> AsrFactor {
        self.asr.unwrap_or(self.method.asr)
    }

    /// Midnight mode in effect.
    pub fn midnight_mode(&self) -> MidnightMode {
        self.midnight.unwrap_or(self.method.midnight)
    }

    /// Checks every field. Called by the engine before computing.
    pub fn validate(&self) -> Result<(), MiqatError> {
        self.method.validate()?;
        if let AsrFactor::Factor(f) = self.asr_factor() {
            if !f.is_finite() || f <= 0.0 {
                return Err(MiqatError::invalid_config(format!(
                    "Asr shadow factor {} must be positive",
                    f
                )));
            }
        }
        if !(1..=MAX_ITERATIONS).contains(&self.iterations) {
            return Err(MiqatError::invalid_config(format!(
                "Iteration count {} outside [1, {}]",
                self.iterations, MAX_ITERATIONS
            )));
        }
        match self.imsak {
            ImsakRule::MinutesBeforeFajr(m) if !m.is_finite() || !(0.0..=120.0).contains(&m) => {
                return Err(MiqatError::invalid_config(format!(
                    "Imsak offset {} minutes outside [0, 120]",
                    m
                )));
            }
            ImsakRule::Angle(a) if !a.is_finite() || a <= 0.0 || a >= 90.0 => {
                return Err(MiqatError::invalid_config(format!(
                    "Imsak angle {} must be within (0, 90) degrees",
                    a
                )));
            }
            _ => {}
        }
        self.tune.validate()
    }
}

/// Builder with validation for `PrayerConfig`.
#[derive(Debug, Default)]
pub struct PrayerConfigBuilder {
    method: Option<Method>,
    method_name: Option<String>,
    asr: Option<AsrFactor>,
    high_latitude: Option<HighLatitudeRule>,
    midnight: Option<MidnightMode>,
    imsak: Option<ImsakRule>,
    tune: Tune,
    iterations: Option<u8>,
    rounding: Option<Rounding>,
}

impl PrayerConfigBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn method(mut self, method: Method) -> Self { self.method = Some(method); self }
    /// Resolved against the registry at `build()`.
    pub fn method_name(mut self, name: impl Into<String>) -> Self { self.method_name = Some(name.into()); self }
    pub fn asr(mut self, asr: AsrFactor) -> Self { self.asr = Some(asr); self }
    pub fn high_latitude(mut self, rule: HighLatitudeRule) -> Self { self.high_latitude = Some(rule); self }
    pub fn midnight(mut self, mode: MidnightMode) -> Self { self.midnight = Some(mode); self }
    pub fn imsak(mut self, rule: ImsakRule) -> Self { self.imsak = Some(rule); self }
    pub fn tune(mut self, prayer: Prayer, minutes: f64) -> Self { self.tune = self.tune.set(prayer, minutes); self }
    pub fn iterations(mut self, iterations: u8) -> Self { self.iterations = Some(iterations); self }
    pub fn rounding(mut self, rounding: Rounding) -> Self { self.rounding = Some(rounding); self }

    /// Builds and validates. Unlike `PrayerConfig::iterations`, an out of
    /// range iteration count is an error here.
    pub fn build(self) -> Result<PrayerConfig, MiqatError> {
        let method = match (self.method, self.method_name) {
            (Some(m), _) => m,
            (None, Some(name)) => Method::lookup(&name)?,
            (None, None) => Method::default(),
        };

        let config = PrayerConfig {
            method,
            asr: self.asr,
            high_latitude: self.high_latitude.unwrap_or_default(),
            midnight: self.midnight,
            imsak: self.imsak.unwrap_or_default(),
            tune: self.tune,
            iterations: self.iterations.unwrap_or(1),
            rounding: self.rounding.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}
