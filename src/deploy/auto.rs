// ABOUTME: Automatic canary progression: fixed weight steps separated by waits, then promote.
// ABOUTME: Waits go through the Pause trait so the full sequence can run without real delays.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::{AliasName, Version, Weight};

use super::deployer::{CanaryOutcome, Deployer, PromoteOutcome};
use crate::alias::AliasService;

/// Suspends progression between canary steps.
#[async_trait]
pub trait Pause: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Waits in real time. There is no cancellation; killing the process
/// leaves the canary at the last applied weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sleep;

#[async_trait]
impl Pause for Sleep {
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Validated step size and wait for an automatic progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoPlan {
    step_percent: u32,
    wait: Duration,
}

impl AutoPlan {
    pub const DEFAULT_STEP_PERCENT: u32 = 10;
    pub const DEFAULT_WAIT: Duration = Duration::from_secs(5 * 60);

    pub fn new(step_percent: u32, wait: Duration) -> Result<Self> {
        if !(1..=100).contains(&step_percent) {
            return Err(Error::invalid_input(format!(
                "invalid percentage '{step_percent}', valid range is 1-100"
            )));
        }
        if wait.is_zero() {
            return Err(Error::invalid_input("wait duration must be greater than zero"));
        }
        Ok(Self { step_percent, wait })
    }

    pub fn step_percent(&self) -> u32 {
        self.step_percent
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Canary percents `step, 2*step, ...` strictly below 100.
    /// The move to 100% is the promote, never a canary step.
    pub fn percents(&self) -> Vec<u32> {
        (1..)
            .map(|n| n * self.step_percent)
            .take_while(|pct| *pct < 100)
            .collect()
    }

    /// Canary steps plus the terminal promote.
    pub fn total_steps(&self) -> usize {
        self.percents().len() + 1
    }

    /// Wall-clock time spent waiting across the whole run.
    pub fn total_wait(&self) -> Duration {
        self.wait * self.percents().len() as u32
    }
}

/// Progress notifications from an automatic run.
#[derive(Debug, Clone, PartialEq)]
pub enum AutoEvent {
    /// Versions captured once at the start and used for every step.
    Started { live: Version, latest: Version },
    StepApplied {
        index: usize,
        total: usize,
        primary: Version,
        canary: Version,
        weight: Weight,
    },
    Waiting { duration: Duration },
    Promoting { index: usize, total: usize },
}

impl<S: AliasService + ?Sized> Deployer<'_, S> {
    /// Step the canary through `plan`, waiting after each step, then promote.
    ///
    /// `live` and `latest` are read once; concurrent alias changes during the
    /// run are not detected. Any failure aborts immediately without retry or
    /// undoing steps already applied.
    pub async fn auto<P: Pause + ?Sized>(
        &self,
        plan: &AutoPlan,
        pause: &P,
        mut on_event: impl FnMut(AutoEvent),
    ) -> Result<PromoteOutcome> {
        let live = self.read_version(AliasName::Live).await?;
        let latest = self.read_version(AliasName::Latest).await?;

        if live == latest {
            return Err(Error::precondition(format!(
                "live and latest both point to version {live}, deploy a new version first"
            )));
        }

        on_event(AutoEvent::Started {
            live: live.clone(),
            latest: latest.clone(),
        });

        let total = plan.total_steps();
        for (i, percent) in plan.percents().into_iter().enumerate() {
            let weight = Weight::from_percent(percent)
                .map_err(|e| Error::invalid_input(e.to_string()))?;

            let outcome = self
                .apply_canary(live.clone(), latest.clone(), weight)
                .await?;
            if let CanaryOutcome::Applied {
                primary,
                canary,
                weight,
            } = outcome
            {
                on_event(AutoEvent::StepApplied {
                    index: i + 1,
                    total,
                    primary,
                    canary,
                    weight,
                });
            }

            on_event(AutoEvent::Waiting {
                duration: plan.wait(),
            });
            pause.pause(plan.wait()).await;
        }

        on_event(AutoEvent::Promoting {
            index: total,
            total,
        });
        self.promote_versions(live, latest).await
    }
}
