// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines global targeting flags and all release subcommands.

use clap::{Parser, Subcommand};
use lad::deploy::{AutoPlan, CanaryStrategy};
use lad::types::{Environment, Version};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "lad")]
#[command(about = "Canary releases for AWS Lambda functions using live, latest, and previous aliases")]
#[command(version)]
pub struct Cli {
    /// Target environment
    #[arg(long, global = true, value_enum, default_value_t = Environment::Test)]
    pub env: Environment,

    /// Lambda function name (defaults to <stack_name>-function-default from samconfig.toml)
    #[arg(long, global = true)]
    pub function: Option<String>,

    /// AWS profile (defaults to the environment's profile in samconfig.toml)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Path to samconfig.toml
    #[arg(long, global = true)]
    pub samconfig: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print final results
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build, publish a new version, and point the latest alias at it
    Deploy {
        /// Publish without running sam build and sam deploy
        #[arg(long)]
        skip_build: bool,
    },

    /// Route a share of live traffic to the latest version
    Canary {
        /// Percentage of traffic for the latest version (0 clears routing)
        #[arg(
            long,
            value_parser = clap::value_parser!(u32).range(0..=100),
            conflicts_with = "strategy",
            required_unless_present = "strategy"
        )]
        percent: Option<u32>,

        /// Named step: canary0, canary10, canary25, canary50, canary75, canary100
        #[arg(long)]
        strategy: Option<CanaryStrategy>,

        /// Promote immediately after applying (75% only)
        #[arg(long)]
        auto_promote: bool,
    },

    /// Step the canary up automatically, then promote
    Auto {
        /// Percentage added at each step (1-100)
        #[arg(
            long,
            default_value_t = AutoPlan::DEFAULT_STEP_PERCENT,
            value_parser = clap::value_parser!(u32).range(1..=100)
        )]
        percent: u32,

        /// Time to hold each step, e.g. 30s, 5m, 1h
        #[arg(long, default_value = "5m", value_parser = parse_wait)]
        wait: Duration,
    },

    /// Send all live traffic to the latest version
    Promote {
        /// Skip the active canary check
        #[arg(long)]
        skip_canary: bool,
    },

    /// Revert live (and latest) to the previous version
    Rollback {
        /// Reason recorded in the rollback log
        #[arg(long)]
        reason: Option<String>,

        /// Rollback log file (defaults to rollback.log next to the executable)
        #[arg(long)]
        rollback_log: Option<PathBuf>,
    },

    /// Point live at a specific version, bypassing the release flow
    Switch {
        /// Target version
        #[arg(long)]
        version: Version,
    },

    /// Show alias versions, canary state, and suggested next steps
    Status,
}

fn parse_wait(value: &str) -> Result<Duration, String> {
    let wait = humantime_serde::re::humantime::parse_duration(value).map_err(|e| e.to_string())?;
    if wait.is_zero() {
        return Err("wait duration must be greater than zero".to_string());
    }
    Ok(wait)
}
