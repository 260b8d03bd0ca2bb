// ABOUTME: Canonical canary strategies and their traffic weights.
// ABOUTME: Fixed ordering canary0 < canary10 < ... < canary100 defines the successor step.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::types::Weight;

/// A named canary step with a fixed traffic weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanaryStrategy {
    /// Clears routing; all traffic back on the primary version.
    Canary0,
    Canary10,
    Canary25,
    Canary50,
    Canary75,
    /// Full cutover to the canary without updating `previous`.
    Canary100,
}

impl CanaryStrategy {
    /// All strategies in ascending weight order.
    pub const ALL: [CanaryStrategy; 6] = [
        CanaryStrategy::Canary0,
        CanaryStrategy::Canary10,
        CanaryStrategy::Canary25,
        CanaryStrategy::Canary50,
        CanaryStrategy::Canary75,
        CanaryStrategy::Canary100,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanaryStrategy::Canary0 => "canary0",
            CanaryStrategy::Canary10 => "canary10",
            CanaryStrategy::Canary25 => "canary25",
            CanaryStrategy::Canary50 => "canary50",
            CanaryStrategy::Canary75 => "canary75",
            CanaryStrategy::Canary100 => "canary100",
        }
    }

    pub fn percent(&self) -> u32 {
        match self {
            CanaryStrategy::Canary0 => 0,
            CanaryStrategy::Canary10 => 10,
            CanaryStrategy::Canary25 => 25,
            CanaryStrategy::Canary50 => 50,
            CanaryStrategy::Canary75 => 75,
            CanaryStrategy::Canary100 => 100,
        }
    }

    pub fn weight(&self) -> Weight {
        // Table percents are all within 0..=100.
        Weight::from_percent(self.percent()).unwrap_or(Weight::ZERO)
    }

    /// Next higher strategy; the maximum is its own successor.
    pub fn successor(&self) -> CanaryStrategy {
        match self {
            CanaryStrategy::Canary0 => CanaryStrategy::Canary10,
            CanaryStrategy::Canary10 => CanaryStrategy::Canary25,
            CanaryStrategy::Canary25 => CanaryStrategy::Canary50,
            CanaryStrategy::Canary50 => CanaryStrategy::Canary75,
            CanaryStrategy::Canary75 | CanaryStrategy::Canary100 => CanaryStrategy::Canary100,
        }
    }

    /// Next lower strategy; the minimum is its own predecessor.
    pub fn predecessor(&self) -> CanaryStrategy {
        match self {
            CanaryStrategy::Canary0 | CanaryStrategy::Canary10 => CanaryStrategy::Canary0,
            CanaryStrategy::Canary25 => CanaryStrategy::Canary10,
            CanaryStrategy::Canary50 => CanaryStrategy::Canary25,
            CanaryStrategy::Canary75 => CanaryStrategy::Canary50,
            CanaryStrategy::Canary100 => CanaryStrategy::Canary75,
        }
    }

    /// Strategy whose weight is exactly `percent`, if any.
    pub fn from_percent(percent: u32) -> Option<CanaryStrategy> {
        Self::ALL.into_iter().find(|s| s.percent() == percent)
    }

    /// Weight for a strategy name; `None` means the name is not a strategy,
    /// which is distinct from the explicit zero of `canary0`.
    pub fn weight_of(name: &str) -> Option<Weight> {
        name.parse::<CanaryStrategy>().ok().map(|s| s.weight())
    }

    pub fn is_valid(name: &str) -> bool {
        name.parse::<CanaryStrategy>().is_ok()
    }

    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for CanaryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid canary strategy '{name}', valid strategies are: {valid}")]
pub struct UnknownStrategy {
    pub name: String,
    pub valid: String,
}

impl FromStr for CanaryStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| UnknownStrategy {
                name: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

/// Validated operator input for a canary step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanaryRequest {
    pub weight: Weight,
    /// Canonical strategy matching the weight, if there is one.
    pub strategy: Option<CanaryStrategy>,
    pub auto_promote: bool,
}

impl CanaryRequest {
    /// Build from either a whole percent or a named strategy.
    ///
    /// Auto-promote is only accepted at 75%, the last step before full cutover.
    pub fn new(
        percent: Option<u32>,
        strategy: Option<CanaryStrategy>,
        auto_promote: bool,
    ) -> crate::error::Result<Self> {
        let (weight, strategy) = match (percent, strategy) {
            (Some(_), Some(_)) => {
                return Err(Error::invalid_input(
                    "specify either --percent or --strategy, not both",
                ));
            }
            (None, None) => {
                return Err(Error::invalid_input("one of --percent or --strategy is required"));
            }
            (Some(percent), None) => (
                Weight::from_percent(percent).map_err(|e| Error::invalid_input(e.to_string()))?,
                CanaryStrategy::from_percent(percent),
            ),
            (None, Some(strategy)) => (strategy.weight(), Some(strategy)),
        };

        if auto_promote && strategy != Some(CanaryStrategy::Canary75) {
            return Err(Error::invalid_input(
                "--auto-promote is only allowed with the canary75 strategy (75%)",
            ));
        }

        Ok(Self {
            weight,
            strategy,
            auto_promote,
        })
    }

    /// Strategy to suggest after this one is applied, if there is a higher one.
    pub fn suggested_next(&self) -> Option<CanaryStrategy> {
        let current = self.strategy?;
        let next = current.successor();
        (next != current).then_some(next)
    }
}
