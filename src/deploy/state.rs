// ABOUTME: Canary state derived from the live alias, and status classification.
// ABOUTME: Nothing here is persisted; every value is recomputed from fresh alias reads.

use std::fmt;

use crate::alias::AliasState;
use crate::types::{Environment, Version, Weight};

use super::CanaryStrategy;

/// Traffic state of the `live` alias.
#[derive(Debug, Clone, PartialEq)]
pub enum CanaryState {
    /// All traffic on one version.
    Stable(Version),
    /// Traffic split between the primary and a canary version.
    Canary {
        primary: Version,
        canary: Version,
        weight: Weight,
    },
}

impl CanaryState {
    pub fn from_alias(live: &AliasState) -> Self {
        match &live.routing {
            None => CanaryState::Stable(live.version.clone()),
            Some(routing) => CanaryState::Canary {
                primary: live.version.clone(),
                canary: routing.canary.clone(),
                weight: routing.weight,
            },
        }
    }
}

/// Overall release status of a function's aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// `live == latest`, no routing.
    Stable,
    /// `live != latest`, no routing: a published version awaits release.
    Pending,
    /// `live` carries a routing entry.
    CanaryActive,
    /// At least one alias is not configured.
    Incomplete,
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StatusClass::Stable => "stable",
            StatusClass::Pending => "pending",
            StatusClass::CanaryActive => "canary-active",
            StatusClass::Incomplete => "incomplete",
        })
    }
}

/// Suggested follow-up command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    Deploy,
    StartCanary(CanaryStrategy),
    AdjustCanary,
    /// Drop the canary routing and keep the current primary.
    ClearCanary,
    Promote { skip_canary: bool },
    Rollback,
}

impl NextAction {
    pub fn description(&self) -> &'static str {
        match self {
            NextAction::Deploy => "deploy a new version",
            NextAction::StartCanary(_) => "start a canary release",
            NextAction::AdjustCanary => "adjust the canary weight",
            NextAction::ClearCanary => "abandon the canary and keep the current version",
            NextAction::Promote { skip_canary: false } => "complete the canary release",
            NextAction::Promote { skip_canary: true } => "release directly",
            NextAction::Rollback => "roll back to the previous version",
        }
    }

    pub fn command(&self, env: Environment) -> String {
        match self {
            NextAction::Deploy => format!("lad deploy --env {env}"),
            NextAction::StartCanary(strategy) => {
                format!("lad canary --env {env} --strategy {strategy}")
            }
            NextAction::AdjustCanary => format!("lad canary --env {env} --strategy <strategy>"),
            NextAction::ClearCanary => format!(
                "lad canary --env {env} --strategy {}",
                CanaryStrategy::Canary0
            ),
            NextAction::Promote { skip_canary: false } => format!("lad promote --env {env}"),
            NextAction::Promote { skip_canary: true } => {
                format!("lad promote --env {env} --skip-canary")
            }
            NextAction::Rollback => format!("lad rollback --env {env}"),
        }
    }
}

/// Snapshot of all three aliases. `None` means the alias is not configured.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub live: Option<AliasState>,
    pub previous: Option<Version>,
    pub latest: Option<Version>,
}

impl StatusReport {
    pub fn canary_state(&self) -> Option<CanaryState> {
        self.live.as_ref().map(CanaryState::from_alias)
    }

    pub fn class(&self) -> StatusClass {
        let Some(live) = &self.live else {
            return StatusClass::Incomplete;
        };
        if live.routing.is_some() {
            return StatusClass::CanaryActive;
        }
        match &self.latest {
            None => StatusClass::Incomplete,
            Some(latest) if *latest == live.version => StatusClass::Stable,
            Some(_) => StatusClass::Pending,
        }
    }

    /// Whether rollback would change `live`; it is a no-op otherwise.
    fn can_roll_back(&self) -> bool {
        match (&self.previous, &self.live) {
            (Some(previous), Some(live)) => *previous != live.version,
            _ => false,
        }
    }

    pub fn next_actions(&self) -> Vec<NextAction> {
        match self.class() {
            StatusClass::Stable => {
                let mut actions = vec![NextAction::Deploy];
                if self.can_roll_back() {
                    actions.push(NextAction::Rollback);
                }
                actions
            }
            StatusClass::Pending => vec![
                NextAction::StartCanary(CanaryStrategy::Canary10),
                NextAction::Promote { skip_canary: true },
            ],
            StatusClass::CanaryActive => vec![
                NextAction::Promote { skip_canary: false },
                if self.can_roll_back() {
                    NextAction::Rollback
                } else {
                    NextAction::ClearCanary
                },
                NextAction::AdjustCanary,
            ],
            StatusClass::Incomplete => vec![NextAction::Deploy],
        }
    }
}
