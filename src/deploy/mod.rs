// ABOUTME: Canary release orchestration over the live, latest, and previous aliases.
// ABOUTME: Exports the strategy table, the Deployer transitions, auto progression, and build step.

mod auto;
mod build;
mod deployer;
mod state;
mod strategy;

pub use auto::{AutoEvent, AutoPlan, Pause, Sleep};
pub use build::{BuildRunner, SamCli};
pub use deployer::{
    CanaryOutcome, DeployOutcome, Deployer, PromoteOutcome, RollbackOutcome, RollbackRequest,
    SwitchOutcome,
};
pub use state::{CanaryState, NextAction, StatusClass, StatusReport};
pub use strategy::{CanaryRequest, CanaryStrategy, UnknownStrategy};
