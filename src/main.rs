// ABOUTME: Entry point for the lad CLI application.
// ABOUTME: Parses arguments, resolves settings, and dispatches to command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use lad::alias::LambdaAliasService;
use lad::config::{Overrides, Settings};
use lad::deploy::{AutoPlan, CanaryRequest, Deployer};
use lad::error::{ExitCode, Result};
use lad::output::{Output, OutputMode};
use lad::types::Version;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// A command whose local arguments have been checked.
enum Action {
    Deploy { skip_build: bool },
    Canary(CanaryRequest),
    Auto(AutoPlan),
    Promote { skip_canary: bool },
    Rollback {
        reason: Option<String>,
        log: Option<PathBuf>,
    },
    Switch(Version),
    Status,
}

impl Action {
    fn validate(command: Commands) -> Result<Self> {
        Ok(match command {
            Commands::Deploy { skip_build } => Action::Deploy { skip_build },
            Commands::Canary {
                percent,
                strategy,
                auto_promote,
            } => Action::Canary(CanaryRequest::new(percent, strategy, auto_promote)?),
            Commands::Auto { percent, wait } => Action::Auto(AutoPlan::new(percent, wait)?),
            Commands::Promote { skip_canary } => Action::Promote { skip_canary },
            Commands::Rollback {
                reason,
                rollback_log,
            } => Action::Rollback {
                reason,
                log: rollback_log,
            },
            Commands::Switch { version } => Action::Switch(version),
            Commands::Status => Action::Status,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version requests go to stdout and are not failures.
            let code = if e.use_stderr() {
                ExitCode::InvalidInput
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            std::process::exit(code.code());
        }
    };

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    if let Err(e) = run(cli, mode).await {
        Output::new(mode).error(&e.to_string());
        tracing::debug!(kind = ?e.kind(), "command failed");
        std::process::exit(e.exit_code().code());
    }
}

async fn run(cli: Cli, mode: OutputMode) -> Result<()> {
    let output = Output::new(mode);
    let action = Action::validate(cli.command)?;

    let cwd = env::current_dir()?;
    let overrides = Overrides {
        function: cli.function,
        profile: cli.profile,
        samconfig: cli.samconfig,
    };
    let settings = Settings::resolve(cli.env, &overrides, &cwd)?;
    tracing::debug!(
        env = %settings.env,
        function = %settings.function,
        profile = ?settings.profile,
        "resolved settings"
    );

    let service = LambdaAliasService::connect(settings.profile.as_deref()).await;
    let deployer = Deployer::new(&service, &settings.function);
    let env = settings.env;

    match action {
        Action::Deploy { skip_build } => {
            let project_dir = (!skip_build).then_some(cwd.as_path());
            commands::deploy(&deployer, env, project_dir, output).await
        }
        Action::Canary(request) => commands::canary(&deployer, env, request, output).await,
        Action::Auto(plan) => commands::auto(&deployer, plan, output).await,
        Action::Promote { skip_canary } => commands::promote(&deployer, skip_canary, output).await,
        Action::Rollback { reason, log } => {
            commands::rollback(&deployer, env, reason, log, output).await
        }
        Action::Switch(version) => commands::switch(&deployer, &version, output).await,
        Action::Status => commands::status(&deployer, env, output).await,
    }
}
