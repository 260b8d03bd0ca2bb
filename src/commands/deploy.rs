// ABOUTME: Deploy command implementation.
// ABOUTME: Builds with SAM, publishes a version, and moves the latest alias to it.

use std::path::Path;

use chrono::Local;
use lad::alias::AliasService;
use lad::deploy::{BuildRunner, CanaryStrategy, Deployer, NextAction, SamCli};
use lad::diagnostics::Diagnostics;
use lad::error::Result;
use lad::output::Output;
use lad::types::Environment;

use super::emit_warnings;

pub async fn deploy<S: AliasService + ?Sized>(
    deployer: &Deployer<'_, S>,
    env: Environment,
    project_dir: Option<&Path>,
    mut output: Output,
) -> Result<()> {
    output.start_timer();
    let mut diag = Diagnostics::default();

    let description = format!("Deployed at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let sam = project_dir.map(SamCli::new);
    let build = sam.as_ref().map(|sam| sam as &dyn BuildRunner);

    output.progress(&format!("Deploying {} ({env})", deployer.function()));
    if build.is_none() {
        output.progress("  → Skipping sam build and sam deploy");
    }

    let outcome = deployer.deploy(build, &description, &mut diag).await?;

    emit_warnings(&output, &diag);
    output.success(&format!(
        "Published version {} to latest ({})",
        outcome.version, outcome.description
    ));
    let next = NextAction::StartCanary(CanaryStrategy::Canary10);
    output.progress(&format!("Next: {} → {}", next.description(), next.command(env)));
    Ok(())
}
