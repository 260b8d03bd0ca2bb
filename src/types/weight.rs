// ABOUTME: Traffic weight routed to a canary version, and the routing entry carrying it.
// ABOUTME: Weights are fractions in [0, 1]; operator input arrives as whole percents.

use std::fmt;
use thiserror::Error;

use super::Version;

#[derive(Debug, Error, PartialEq)]
pub enum WeightError {
    #[error("invalid percentage '{0}', valid range is 0-100")]
    PercentOutOfRange(u32),

    #[error("invalid weight '{0}', valid range is 0.0-1.0")]
    FractionOutOfRange(f64),
}

/// Fraction of invocations sent to the canary version.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    pub const ZERO: Weight = Weight(0.0);
    pub const FULL: Weight = Weight(1.0);

    /// Build a weight from a whole percentage (0-100).
    pub fn from_percent(percent: u32) -> Result<Self, WeightError> {
        if percent > 100 {
            return Err(WeightError::PercentOutOfRange(percent));
        }
        Ok(Self(f64::from(percent) / 100.0))
    }

    /// Build a weight from a raw fraction, as reported by the alias service.
    pub fn from_fraction(fraction: f64) -> Result<Self, WeightError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(WeightError::FractionOutOfRange(fraction));
        }
        Ok(Self(fraction))
    }

    pub fn fraction(&self) -> f64 {
        self.0
    }

    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Share left on the primary version.
    pub fn complement(&self) -> Weight {
        Weight(1.0 - self.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.percent())
    }
}

/// The single additional-version entry on an alias.
#[derive(Debug, Clone, PartialEq)]
pub struct Routing {
    pub canary: Version,
    pub weight: Weight,
}

impl Routing {
    pub fn new(canary: Version, weight: Weight) -> Self {
        Self { canary, weight }
    }
}
